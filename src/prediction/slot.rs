//! Latest prediction held for a session.

use crate::sequence::{Sequence, Ticket};

use super::models::PredictionOutcome;

/// Holds the most recent prediction outcome.
///
/// Starting a prediction clears the previous outcome. A response from an
/// older request never replaces the result of a newer one.
#[derive(Debug, Default)]
pub struct PredictionSlot {
    requests: Sequence,
    pending: bool,
    latest: Option<PredictionOutcome>,
}

impl PredictionSlot {
    pub fn begin(&mut self) -> Ticket {
        self.pending = true;
        self.latest = None;
        self.requests.issue()
    }

    /// Store `outcome` if `ticket` is still current. Returns whether it was kept.
    pub fn finish(&mut self, ticket: Ticket, outcome: PredictionOutcome) -> bool {
        if !self.requests.is_current(ticket) {
            tracing::debug!("discarding stale prediction response");
            return false;
        }
        self.pending = false;
        self.latest = Some(outcome);
        true
    }

    /// Record that the request for `ticket` failed.
    pub fn fail(&mut self, ticket: Ticket) {
        if self.requests.is_current(ticket) {
            self.pending = false;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn latest(&self) -> Option<&PredictionOutcome> {
        self.latest.as_ref()
    }
}
