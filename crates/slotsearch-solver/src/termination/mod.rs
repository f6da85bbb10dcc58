//! Termination conditions, checked at round boundaries.

mod composite;
mod exhausted;
mod round_limit;

use std::fmt::{self, Debug};

use crate::scope::SearchState;

pub use composite::OrTermination;
pub use exhausted::{FeasibilityExhaustedTermination, FrontierExhaustedTermination};
pub use round_limit::RoundLimitTermination;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Every structurally possible shape has been resolved.
    FeasibilityExhausted,
    /// The last round discovered no new inventories.
    FrontierExhausted,
    /// The round safety limit was reached; unresolved shapes are unknown, not unreachable.
    RoundLimit,
}

impl TerminationReason {
    /// Whether the tables are final (no further round could change them).
    pub fn is_complete(&self) -> bool {
        !matches!(self, TerminationReason::RoundLimit)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::FeasibilityExhausted => write!(f, "feasibility_exhausted"),
            TerminationReason::FrontierExhausted => write!(f, "frontier_exhausted"),
            TerminationReason::RoundLimit => write!(f, "round_limit"),
        }
    }
}

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns why the search should stop, or `None` to run another round.
    fn check(&self, state: &SearchState) -> Option<TerminationReason>;

    /// Returns true if searching should terminate.
    fn is_terminated(&self, state: &SearchState) -> bool {
        self.check(state).is_some()
    }
}

/// Standard stopping rule: feasibility exhausted, frontier exhausted, or round limit.
pub type DefaultTermination = OrTermination<(
    FeasibilityExhaustedTermination,
    FrontierExhaustedTermination,
    RoundLimitTermination,
)>;

/// Builds the standard stopping rule for `round_limit`.
pub fn default_termination(round_limit: u32) -> DefaultTermination {
    OrTermination::new((
        FeasibilityExhaustedTermination,
        FrontierExhaustedTermination,
        RoundLimitTermination::new(round_limit),
    ))
}

#[cfg(test)]
mod tests;
