use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use super::*;
use crate::event::CountingRoundListener;
use crate::termination::{default_termination, RoundLimitTermination};
use crate::test_utils::{
    at_most_distances, brute_force_distances, run_serial, small_instance, split_instance,
    state_for, tiny_instance, tiny_state, Fixture,
};
use crate::witness::verify_witnesses;
use slotsearch_config::MoveThreadCount;
use slotsearch_core::{Move, OccupancyMode, Shape, Signature};

fn resolved_map(state: &SearchState) -> BTreeMap<Shape, u32> {
    state
        .table()
        .resolved()
        .map(|(shape, d, _)| (shape, d))
        .collect()
}

#[test]
fn test_two_slot_scenario() {
    let mut state = tiny_state();
    let outcome = run_serial(&mut state, 20);

    assert_eq!(outcome.reason, TerminationReason::FeasibilityExhausted);
    assert_eq!(state.round(), 2);

    let table = state.table();
    assert_eq!(table.distance(Shape::new(1, 0)), Some(0));
    assert_eq!(table.witness(Shape::new(1, 0)), Some(&[][..]));
    assert_eq!(table.distance(Shape::new(1, 1)), Some(1));
    assert_eq!(table.witness(Shape::new(1, 1)), Some(&[Move::ClickOut(0)][..]));
    assert_eq!(table.distance(Shape::new(0, 2)), Some(1));
    assert_eq!(table.witness(Shape::new(0, 2)), Some(&[Move::ClickIn(0)][..]));
    assert_eq!(table.distance(Shape::new(2, 0)), Some(2));
    assert_eq!(
        table.witness(Shape::new(2, 0)),
        Some(&[Move::ClickOut(0), Move::ClickOut(1)][..])
    );
    assert_eq!(table.resolved_count(), 4);

    let rounds = &outcome.statistics.rounds;
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0].resolved, 2);
    assert!(!rounds[0].stopped_early);
    assert_eq!(rounds[1].resolved, 1);
    assert!(rounds[1].stopped_early);
    assert_eq!(rounds[1].remaining_feasible, 0);
}

#[test]
fn test_round_limit_leaves_unknown_entries() {
    let mut state = tiny_state();
    let outcome = run_serial(&mut state, 1);

    assert_eq!(outcome.reason, TerminationReason::RoundLimit);
    assert!(!outcome.reason.is_complete());
    assert_eq!(state.round(), 1);
    assert_eq!(state.table().distance(Shape::new(2, 0)), None);
    assert_eq!(state.feasible().len(), 1);
}

#[test]
fn test_early_stop_finishes_current_entry() {
    let fixtures = [
        tiny_instance(),
        small_instance(),
        split_instance(),
        Fixture::new(vec![4, 1, 0, 0], 0, 4),
    ];
    let mut partial_rounds = 0;
    for fixture in fixtures {
        let mut state = state_for(&fixture, OccupancyMode::Exact);
        let outcome = run_serial(&mut state, 50);
        let Some(last) = outcome.statistics.rounds.last() else {
            continue;
        };
        if !last.stopped_early {
            continue;
        }
        partial_rounds += 1;

        // The partial round must be exactly the full expansion of a prefix
        // of the previous frontier.
        let history = state.history();
        let previous = &history[history.len() - 2];
        let expanded = last.expanded as usize;
        assert!(expanded < previous.len(), "{}", fixture.start);

        let mut seen: HashSet<Signature> = history[..history.len() - 1]
            .iter()
            .flatten()
            .map(|entry| entry.inventory.signature())
            .collect();
        let generator = MoveGenerator::new(state.instance().capacity());
        let mut expected = Vec::new();
        for entry in &previous[..expanded] {
            for successor in generator.successors(&entry.inventory) {
                if seen.insert(successor.signature) {
                    let path = entry.extended_path(successor.mv);
                    expected.push(FrontierEntry::new(successor.inventory, path));
                }
            }
        }
        assert_eq!(state.frontier(), expected.as_slice(), "{}", fixture.start);
    }
    assert!(partial_rounds > 0);
}

#[test]
fn test_matches_brute_force_exact() {
    for fixture in [small_instance(), split_instance()] {
        let mut state = state_for(&fixture, OccupancyMode::Exact);
        let outcome = run_serial(&mut state, 50);
        assert!(outcome.reason.is_complete());

        let expected = brute_force_distances(&fixture.start, fixture.capacity, 50);
        assert_eq!(resolved_map(&state), expected, "{}", fixture.start);
    }
}

#[test]
fn test_matches_brute_force_at_most() {
    for fixture in [small_instance(), split_instance()] {
        let mut state = state_for(&fixture, OccupancyMode::AtMost);
        let outcome = run_serial(&mut state, 50);
        assert!(outcome.reason.is_complete());

        let exact = brute_force_distances(&fixture.start, fixture.capacity, 50);
        let expected = at_most_distances(&exact, fixture.start.slot_count());
        assert_eq!(resolved_map(&state), expected, "{}", fixture.start);
    }
}

#[test]
fn test_witnesses_replay() {
    for mode in [OccupancyMode::Exact, OccupancyMode::AtMost] {
        let mut state = state_for(&small_instance(), mode);
        run_serial(&mut state, 50);
        let mismatches = verify_witnesses(state.table(), state.start(), mode);
        assert!(mismatches.is_empty(), "{mismatches:?}");
    }
}

#[test]
fn test_frontier_conserves_total() {
    let fixture = Fixture::new(vec![4, 1, 0, 0], 0, 4);
    let mut state = state_for(&fixture, OccupancyMode::Exact);
    run_serial(&mut state, 6);

    let total = state.instance().total();
    for (depth, round) in state.history().iter().enumerate() {
        for entry in round {
            assert_eq!(entry.inventory.total(), total);
            assert_eq!(entry.depth(), depth);
        }
    }
    assert!(state.visited().iter().all(|sig| sig.total() == total));
}

#[test]
fn test_resolution_is_monotonic() {
    let mut state = state_for(&small_instance(), OccupancyMode::Exact);
    let engine = SearchEngine::new(default_termination(50));

    while !engine.termination().is_terminated(&state) {
        let before = state.table().clone();
        let feasible_before = state.feasible().len();
        let round = engine.step(&mut state);

        for (shape, d, path) in before.resolved() {
            assert_eq!(state.table().distance(shape), Some(d));
            assert_eq!(state.table().witness(shape), Some(path));
        }
        for (shape, d, _) in state.table().resolved() {
            assert!(d <= round.round, "{shape} at {d} in round {}", round.round);
        }
        assert!(state.feasible().len() <= feasible_before);
    }
}

#[test]
fn test_deterministic() {
    let mut first = state_for(&small_instance(), OccupancyMode::Exact);
    let mut second = state_for(&small_instance(), OccupancyMode::Exact);
    run_serial(&mut first, 50);
    run_serial(&mut second, 50);

    assert_eq!(first.table(), second.table());
    assert_eq!(first.history(), second.history());
    assert_eq!(first.visited(), second.visited());
}

#[test]
fn test_parallel_matches_serial() {
    let fixture = Fixture::new(vec![8, 0, 0, 0, 0], 0, 8);
    let mut serial = state_for(&fixture, OccupancyMode::Exact);
    run_serial(&mut serial, 50);

    for count in [MoveThreadCount::Auto, MoveThreadCount::Count(3)] {
        let expansion = Expansion::from_thread_count(&count).unwrap();
        let mut parallel = state_for(&fixture, OccupancyMode::Exact);
        SearchEngine::new(default_termination(50))
            .with_expansion(expansion)
            .run(&mut parallel)
            .unwrap();

        assert_eq!(parallel.round(), serial.round());
        assert_eq!(parallel.table(), serial.table());
        assert_eq!(parallel.history(), serial.history());
    }
}

#[test]
fn test_resume_is_idempotent() {
    let mut straight = state_for(&small_instance(), OccupancyMode::Exact);
    run_serial(&mut straight, 50);

    for pause_at in 1..straight.round() {
        let mut resumed = state_for(&small_instance(), OccupancyMode::Exact);
        let outcome = run_serial(&mut resumed, pause_at);
        assert_eq!(outcome.reason, TerminationReason::RoundLimit);

        run_serial(&mut resumed, 50);
        assert_eq!(resumed.round(), straight.round());
        assert_eq!(resumed.table(), straight.table());
        assert_eq!(resumed.history(), straight.history());
        assert_eq!(resumed.visited(), straight.visited());
    }
}

#[test]
fn test_finished_state_runs_no_rounds() {
    let mut state = tiny_state();
    run_serial(&mut state, 20);

    let outcome = run_serial(&mut state, 20);
    assert_eq!(outcome.reason, TerminationReason::FeasibilityExhausted);
    assert_eq!(outcome.statistics.round_count(), 0);
    assert_eq!(state.round(), 2);
}

#[test]
fn test_listeners_called() {
    let listener = Arc::new(CountingRoundListener::new());
    let mut state = tiny_state();
    let outcome = SearchEngine::new(default_termination(20))
        .with_listener(listener.clone())
        .run(&mut state)
        .unwrap();

    assert_eq!(listener.round_count(), outcome.statistics.round_count() as u32);
    assert_eq!(listener.end_count(), 1);
}

#[derive(Debug, Default)]
struct ResolvedRecorder {
    resolved: Mutex<Vec<usize>>,
}

impl RoundListener for ResolvedRecorder {
    fn on_round_end(&self, state: &SearchState, _round: &RoundStatistics) {
        self.resolved
            .lock()
            .unwrap()
            .push(state.table().resolved_count());
    }
}

#[test]
fn test_listener_sees_state_after_round() {
    let recorder = Arc::new(ResolvedRecorder::default());
    let mut state = tiny_state();
    SearchEngine::new(default_termination(20))
        .with_listener(recorder.clone())
        .run(&mut state)
        .unwrap();

    assert_eq!(*recorder.resolved.lock().unwrap(), vec![3, 4]);
}

#[test]
fn test_checkpoint_written_each_round() {
    let dir = tempfile::tempdir().unwrap();
    let store = CheckpointStore::new(dir.path(), Default::default());
    let mut state = state_for(&small_instance(), OccupancyMode::Exact);

    SearchEngine::new(RoundLimitTermination::new(2))
        .with_checkpoint(store.clone())
        .run(&mut state)
        .unwrap();

    let loaded = store
        .load(state.instance(), OccupancyMode::Exact)
        .unwrap();
    assert_eq!(loaded.round(), 2);
    assert_eq!(loaded.table(), state.table());
    assert_eq!(loaded.history(), state.history());
}
