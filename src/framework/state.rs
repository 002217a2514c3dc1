//! # Entry State Machine
//!
//! The `{ data, loading_state, errors }` record kept for every key, and the pure reducer
//! functions that move it between `Init`, `Loading` and `Loaded`.
//!
//! ```text
//!            start                 succeed / fail
//!   Init ───────────▶ Loading ──────────────────────▶ Loaded
//!    ▲                  │  ▲                             │
//!    │     abandon      │  └──────── start (forced) ─────┘
//!    └──────────────────┘
//!            clear: any state ──▶ Init
//! ```
//!
//! A successful `start` hands out a [`Ticket`] drawn from a [`TicketIssuer`]. `succeed`,
//! `fail` and `abandon` only apply when presented with the ticket of the fetch currently in
//! flight, so a write from a fetch that was cleared or superseded never lands. One issuer
//! is shared by every entry of a store and never repeats a number, so an entry can be
//! dropped and recreated without reviving old tickets.

use serde::Serialize;

/// Loading phase of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LoadingState {
    #[default]
    Init,
    Loading,
    Loaded,
}

/// Claim on the fetch currently in flight for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of [`Ticket`]s.
#[derive(Debug, Default)]
pub struct TicketIssuer {
    last: u64,
}

impl TicketIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

/// State container entry for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub data: Option<T>,
    pub loading_state: LoadingState,
    pub errors: Option<String>,
    in_flight: Option<Ticket>,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading_state: LoadingState::Init,
            errors: None,
            in_flight: None,
        }
    }
}

impl<T> Entry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading_state == LoadingState::Loading
    }

    /// Indistinguishable from a fresh entry.
    pub fn is_vacant(&self) -> bool {
        self.loading_state == LoadingState::Init && self.data.is_none() && self.errors.is_none()
    }

    /// `Init | Loaded → Loading`.
    ///
    /// Returns `None` if a fetch is already in flight, or if data is present and `force`
    /// is not set.
    pub fn start(&mut self, tickets: &mut TicketIssuer, force: bool) -> Option<Ticket> {
        if self.is_loading() || (self.data.is_some() && !force) {
            return None;
        }
        let ticket = tickets.issue();
        self.loading_state = LoadingState::Loading;
        self.errors = None;
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// `Loading → Loaded` with fresh data.
    pub fn succeed(&mut self, ticket: Ticket, payload: T) -> bool {
        if !self.holds(ticket) {
            return false;
        }
        self.data = Some(payload);
        self.errors = None;
        self.settle(LoadingState::Loaded);
        true
    }

    /// `Loading → Loaded` with an error message. `data` is left untouched.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.holds(ticket) {
            return false;
        }
        self.errors = Some(message.into());
        self.settle(LoadingState::Loaded);
        true
    }

    /// Releases the claim of a cancelled fetch without recording an outcome.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        if !self.holds(ticket) {
            return false;
        }
        let next = if self.data.is_some() {
            LoadingState::Loaded
        } else {
            LoadingState::Init
        };
        self.settle(next);
        true
    }

    /// Any state `→ Init`, dropping data and errors.
    pub fn clear(&mut self) {
        self.data = None;
        self.errors = None;
        self.settle(LoadingState::Init);
    }

    fn holds(&self, ticket: Ticket) -> bool {
        self.is_loading() && self.in_flight == Some(ticket)
    }

    fn settle(&mut self, state: LoadingState) {
        self.loading_state = state;
        self.in_flight = None;
    }
}
