//! # jobboard-sync
//!
//! Demo entry point: loads [`Settings`], mounts a binding for one job and prints the view
//! it settles on.
//!
//! ```bash
//! JOBBOARD__API__BASE_URL=http://localhost:8080 RUST_LOG=debug jobboard-sync 42
//! ```

use jobboard_sync::config::Settings;
use jobboard_sync::lifecycle::{setup_tracing, SyncSystem};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let settings = Settings::load().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(&settings.logging);

    let job_id = std::env::args().nth(1).unwrap_or_else(|| "42".to_string());
    info!(%job_id, base_url = %settings.api.base_url, "Starting job-board sync demo");

    let system = SyncSystem::new(&settings).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("job_view", %job_id);
    let view = async {
        let mut handle = system.jobs.binding.mount(job_id.clone());
        handle.settled().await;
        let view = handle.view().await.map_err(|e| e.to_string());
        handle.unmount();
        view
    }
    .instrument(span)
    .await?;

    match (&view.entity, &view.error) {
        (Some(job), _) => info!(title = %job.title, status = ?job.status, "Job loaded"),
        (None, Some(error)) => warn!(%error, "Job could not be loaded"),
        (None, None) => warn!(state = ?view.loading_state, "Job not loaded"),
    }
    println!("{view:#?}");

    let collapsed = system.sidebar.get().await;
    info!(collapsed, "Sidebar preference");

    system.shutdown().await?;
    Ok(())
}
