//! Round safety limit.

use super::{Termination, TerminationReason};
use crate::scope::SearchState;

/// Terminates once the state has completed `limit` rounds.
///
/// The limit is absolute: a state resumed at round 8 with a limit of 10
/// runs two more rounds.
///
/// # Example
///
/// ```
/// use slotsearch_solver::termination::RoundLimitTermination;
///
/// // At most 20 moves per witness
/// let term = RoundLimitTermination::new(20);
/// assert_eq!(term.limit(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct RoundLimitTermination {
    limit: u32,
}

impl RoundLimitTermination {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Termination for RoundLimitTermination {
    fn check(&self, state: &SearchState) -> Option<TerminationReason> {
        (state.round() >= self.limit).then_some(TerminationReason::RoundLimit)
    }
}
