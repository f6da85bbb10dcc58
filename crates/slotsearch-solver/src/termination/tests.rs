use super::*;
use crate::engine::SearchEngine;
use crate::test_utils::{small_instance, state_for, tiny_state};
use slotsearch_core::OccupancyMode;

fn advance(state: &mut SearchState, rounds: u32) {
    let engine = SearchEngine::new(RoundLimitTermination::new(u32::MAX));
    for _ in 0..rounds {
        engine.step(state);
    }
}

#[test]
fn test_round_limit() {
    let mut state = state_for(&small_instance(), OccupancyMode::Exact);
    let term = RoundLimitTermination::new(2);

    assert!(!term.is_terminated(&state));
    advance(&mut state, 1);
    assert!(!term.is_terminated(&state));
    advance(&mut state, 1);
    assert_eq!(term.check(&state), Some(TerminationReason::RoundLimit));
}

#[test]
fn test_feasibility_exhausted() {
    let mut state = tiny_state();
    assert_eq!(FeasibilityExhaustedTermination.check(&state), None);

    advance(&mut state, 2);
    assert!(state.feasible().is_empty());
    assert_eq!(
        FeasibilityExhaustedTermination.check(&state),
        Some(TerminationReason::FeasibilityExhausted)
    );
}

#[test]
fn test_frontier_exhausted() {
    let mut state = tiny_state();
    assert_eq!(FrontierExhaustedTermination.check(&state), None);

    // All four signatures of the tiny instance are seen by round 2.
    advance(&mut state, 3);
    assert!(state.frontier().is_empty());
    assert_eq!(
        FrontierExhaustedTermination.check(&state),
        Some(TerminationReason::FrontierExhausted)
    );
}

#[test]
fn test_or_reports_first_reason_in_order() {
    let mut state = tiny_state();
    advance(&mut state, 2);

    let term = default_termination(2);
    // Both feasibility and the round limit fire; feasibility is listed first.
    assert_eq!(term.check(&state), Some(TerminationReason::FeasibilityExhausted));

    let reversed = OrTermination::new((
        RoundLimitTermination::new(2),
        FeasibilityExhaustedTermination,
    ));
    assert_eq!(reversed.check(&state), Some(TerminationReason::RoundLimit));
}

#[test]
fn test_or_none_when_no_child_fires() {
    let state = tiny_state();
    let term = OrTermination::new((FrontierExhaustedTermination, RoundLimitTermination::new(5)));
    assert!(!term.is_terminated(&state));
}

#[test]
fn test_reason_display_and_completeness() {
    assert_eq!(TerminationReason::RoundLimit.to_string(), "round_limit");
    assert!(TerminationReason::FeasibilityExhausted.is_complete());
    assert!(TerminationReason::FrontierExhausted.is_complete());
    assert!(!TerminationReason::RoundLimit.is_complete());
}
