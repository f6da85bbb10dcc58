//! Terminations for an exhausted search space.

use super::{Termination, TerminationReason};
use crate::scope::SearchState;

/// Terminates when no structurally possible shape remains unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityExhaustedTermination;

impl Termination for FeasibilityExhaustedTermination {
    fn check(&self, state: &SearchState) -> Option<TerminationReason> {
        state
            .feasible()
            .is_empty()
            .then_some(TerminationReason::FeasibilityExhausted)
    }
}

/// Terminates when the latest round discovered nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontierExhaustedTermination;

impl Termination for FrontierExhaustedTermination {
    fn check(&self, state: &SearchState) -> Option<TerminationReason> {
        state
            .frontier()
            .is_empty()
            .then_some(TerminationReason::FrontierExhausted)
    }
}
