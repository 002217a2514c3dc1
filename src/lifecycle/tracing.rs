//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole data layer.
//!
//! The subscriber uses a compact format that hides the crate/module prefix
//! (`with_target(false)`); records carry `entity_type`/`resource` and `key` fields instead.
//! `RUST_LOG` takes precedence over the configured `logging.level`.
//!
//! ```bash
//! # Store transitions and request URLs
//! RUST_LOG=debug jobboard-sync 42
//!
//! # Only the HTTP layer
//! RUST_LOG=jobboard_sync::http=debug jobboard-sync 42
//! ```
//!
//! With `RUST_LOG=debug`, mounting job `42` reads roughly:
//!
//! ```text
//!  INFO Store started entity_type="Job"
//! DEBUG Started entity_type="Job" key=42 ticket=#1
//! DEBUG fetch: Sending request method=Get url=http://localhost:8080/api/v1/jobs/42
//! DEBUG fetch: Response received url=http://localhost:8080/api/v1/jobs/42 status=200
//!  INFO Loaded entity_type="Job" key=42
//! ```
use crate::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // Don't show module paths - records carry the resource instead
        .compact()
        .init();
}
