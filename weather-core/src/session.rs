//! Explicit state container for one widget session.
//!
//! The session owns the last upstream outcome, the derived display state and
//! the reveal flag. They change only through [`Session::submit`] (or
//! [`Session::spawn_submit`]) and [`Session::on_response`].

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{
    display::{DisplayState, Outcome, map_outcome},
    error::{LookupError, SubmitError},
    provider::WeatherProvider,
};

/// One accepted submission. Tickets are numbered in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    location: String,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// What happened to a response once it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    /// The response replaced the displayed state.
    Applied,
    /// A newer submission had already been applied; the response was dropped.
    Stale,
}

#[derive(Debug, Default)]
struct SessionState {
    outcome: Option<Outcome>,
    display: Option<DisplayState>,
    revealed: bool,
    last_applied: u64,
}

#[derive(Debug, Clone)]
pub struct Session {
    provider: Arc<dyn WeatherProvider>,
    state: Arc<Mutex<SessionState>>,
    next_seq: Arc<AtomicU64>,
}

impl Session {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            state: Arc::new(Mutex::new(SessionState::default())),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Accept a location for lookup. Blank input is rejected and leaves the
    /// session untouched.
    pub fn begin(&self, location: &str) -> Result<Ticket, SubmitError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(SubmitError::EmptyLocation);
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(seq, location, "submission accepted");

        Ok(Ticket {
            seq,
            location: location.to_string(),
        })
    }

    /// Look up `location` and apply the result. Upstream failures are
    /// absorbed into the display state and never returned.
    pub async fn submit(&self, location: &str) -> Result<Submitted, SubmitError> {
        let ticket = self.begin(location)?;
        Ok(self.run(ticket).await)
    }

    /// Like [`Session::submit`] but the request runs on a Tokio task. The
    /// ticket is taken before spawning, so ordering follows call order.
    pub fn spawn_submit(
        &self,
        location: impl AsRef<str>,
    ) -> Result<JoinHandle<Submitted>, SubmitError> {
        let ticket = self.begin(location.as_ref())?;
        let session = self.clone();
        Ok(tokio::spawn(async move { session.run(ticket).await }))
    }

    async fn run(&self, ticket: Ticket) -> Submitted {
        let result = self.provider.current_weather(ticket.location()).await;
        self.on_response(&ticket, result)
    }

    /// Record the upstream result for `ticket` and recompute the display
    /// state. Results older than the last applied one are dropped.
    pub fn on_response(&self, ticket: &Ticket, result: Result<Value, LookupError>) -> Submitted {
        let mut state = self.lock();

        if ticket.seq <= state.last_applied {
            debug!(
                seq = ticket.seq,
                last_applied = state.last_applied,
                location = ticket.location(),
                "dropping stale response"
            );
            return Submitted::Stale;
        }

        if let Err(err) = &result {
            warn!(location = ticket.location(), error = %err, "weather lookup failed");
        }

        let outcome = Outcome::from(result);
        let next = map_outcome(Some(&outcome));
        debug!(seq = ticket.seq, city = %next.city, icon = ?next.image, "display updated");

        state.outcome = Some(outcome);
        state.display = Some(next);
        state.revealed = true;
        state.last_applied = ticket.seq;

        Submitted::Applied
    }

    /// Current display state; `None` until the first response is applied.
    pub fn display(&self) -> Option<DisplayState> {
        self.lock().display.clone()
    }

    /// True once any response has been applied. Never reverts.
    pub fn revealed(&self) -> bool {
        self.lock().revealed
    }

    /// Raw outcome behind the current display state.
    pub fn outcome(&self) -> Option<Outcome> {
        self.lock().outcome.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
