//! Engine contract lock tests: termination reasons, budget semantics,
//! duplicate suppression bounds, single use, and replayable solutions.

use gridwalk_harness::worlds::grid_world::GridWorld;
use gridwalk_kernel::carrier::grid::Position;
use gridwalk_kernel::operators::action::{Action, Direction};
use gridwalk_kernel::proof::replay::{replay, verify_states, ReplayError, ReplayVerdict};
use gridwalk_search::error::SearchError;
use gridwalk_search::policy::SearchPolicy;
use gridwalk_search::report::TerminationReason;
use gridwalk_search::search::{EngineStatus, SearchEngine, SearchOutcome};

use lock_tests::fixtures::{
    generated_map, grid, reachable_state_count, solve_default, solve_with, OPEN_3X3, SEALED,
};

// ---------------------------------------------------------------------------
// The 3x3 open room
// ---------------------------------------------------------------------------

#[test]
fn open_room_cost_four_in_four_steps() {
    let outcome = solve_default(&grid(OPEN_3X3));
    let solution = outcome.solution().expect("open room is solvable");
    assert_eq!(solution.total_cost(), 4);
    assert_eq!(solution.len(), 4);
    assert_eq!(solution.initial.position(), Position::new(0, 0));
    assert_eq!(solution.final_state().position(), Position::new(2, 2));
    assert!(solution.actions().all(|a| a.cost == 1));
    // Every state below cost 4 is expanded before the goal is popped.
    assert_eq!(outcome.stats().expansions, 8);
    // No relaxation on a grid: one push per distinct state.
    assert_eq!(outcome.stats().frontier_pushes, 9);
    assert_eq!(outcome.stats().nodes_created, 9);
    assert!(matches!(
        outcome.stats().termination,
        TerminationReason::GoalReached { cost: 4, .. }
    ));
}

#[test]
fn open_room_default_order_prefers_right_first() {
    let solution = solve_default(&grid(OPEN_3X3)).solution().unwrap().clone();
    let labels: String = solution.actions().map(|a| a.label()).collect();
    assert_eq!(labels, "RRDD");
}

// ---------------------------------------------------------------------------
// Exhaustion
// ---------------------------------------------------------------------------

#[test]
fn sealed_goal_exhausts_every_reachable_state() {
    let g = grid(SEALED);
    let outcome = solve_default(&g);
    assert!(matches!(outcome, SearchOutcome::NoSolution { .. }));
    let stats = outcome.stats();
    assert_eq!(stats.termination, TerminationReason::FrontierExhausted);
    assert_eq!(stats.nodes_created, 4);
    assert_eq!(stats.expansions, 4);
    assert_eq!(reachable_state_count(&g), 4);
}

// ---------------------------------------------------------------------------
// Duplicate suppression bounds
// ---------------------------------------------------------------------------

#[test]
fn nodes_never_exceed_reachable_states() {
    for seed in 0..40 {
        let g = grid(&generated_map(seed, 6, 6));
        let stats = solve_default(&g).stats().clone();
        let reachable = reachable_state_count(&g) as u64;
        assert!(stats.nodes_created <= reachable, "seed {seed}");
        assert!(stats.expansions <= stats.nodes_created, "seed {seed}");
        assert_eq!(
            stats.frontier_pushes,
            stats.nodes_created + stats.relaxations,
            "seed {seed}"
        );
        // Entry cost depends only on the target cell, so no state is ever relaxed.
        assert_eq!(stats.relaxations, 0, "seed {seed}");
    }
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[test]
fn budget_below_requirement_then_sufficient() {
    let g = grid(OPEN_3X3);
    let short = solve_with(&g, &SearchPolicy::default().with_budget(7));
    assert!(matches!(short, SearchOutcome::BudgetExceeded { .. }));
    assert_eq!(
        short.stats().termination,
        TerminationReason::ExpansionBudgetExceeded { budget: 7 }
    );
    assert_eq!(short.stats().expansions, 7);

    let exact = solve_with(&g, &SearchPolicy::default().with_budget(8));
    assert_eq!(exact.solution().map(|s| s.total_cost()), Some(4));
    assert_eq!(exact.stats().expansions, 8);
}

#[test]
fn budget_never_changes_a_found_answer() {
    for seed in 300..320 {
        let g = grid(&generated_map(seed, 5, 5));
        let unbounded = solve_default(&g);
        let needed = unbounded.stats().expansions.max(1);
        let bounded = solve_with(&g, &SearchPolicy::default().with_budget(needed));
        assert_eq!(
            bounded.solution().map(|s| s.total_cost()),
            unbounded.solution().map(|s| s.total_cost()),
            "seed {seed}"
        );
    }
}

#[test]
fn zero_budget_is_rejected() {
    let world = GridWorld::new(grid(OPEN_3X3));
    let err = SearchEngine::new(&world, SearchPolicy::default().with_budget(0))
        .err()
        .unwrap();
    assert!(matches!(err, SearchError::InvalidPolicy { .. }));
}

// ---------------------------------------------------------------------------
// Single use
// ---------------------------------------------------------------------------

#[test]
fn engine_is_single_use() {
    let world = GridWorld::new(grid(OPEN_3X3));
    let mut engine = SearchEngine::new(&world, SearchPolicy::default()).unwrap();
    assert_eq!(engine.status(), EngineStatus::Idle);
    engine.run().unwrap();
    assert_eq!(engine.status(), EngineStatus::Found);
    let err = engine.run().unwrap_err();
    assert!(matches!(
        err,
        SearchError::EngineAlreadyRun {
            status: EngineStatus::Found
        }
    ));
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

#[test]
fn solutions_replay_exactly() {
    for seed in 0..30 {
        let g = grid(&generated_map(seed, 6, 5));
        if let Some(solution) = solve_default(&g).solution() {
            let actions: Vec<_> = solution.actions().collect();
            let recorded: Vec<_> = solution.states().collect();
            let verdict = verify_states(&g, &solution.initial, &actions, &recorded).unwrap();
            assert_eq!(verdict, ReplayVerdict::Match, "seed {seed}");
        }
    }
}

#[test]
fn tampered_solution_is_caught() {
    let g = grid(OPEN_3X3);
    let solution = solve_default(&g).solution().unwrap().clone();
    let mut actions: Vec<_> = solution.actions().collect();

    // Walking off the top edge.
    actions[0] = Action::step(Direction::Up, 1);
    let err = replay(&g, &solution.initial, &actions).unwrap_err();
    assert!(matches!(err, ReplayError::IllegalAction { step: 0, .. }));

    // A legal move with a lie about its cost.
    let mut actions: Vec<_> = solution.actions().collect();
    actions[1].cost = 2;
    let err = replay(&g, &solution.initial, &actions).unwrap_err();
    assert!(matches!(err, ReplayError::IllegalAction { step: 1, .. }));
}
