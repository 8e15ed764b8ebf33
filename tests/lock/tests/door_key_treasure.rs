//! Inventory lock tests: doors, permanent keys, and treasure collection.

use gridwalk_kernel::carrier::grid::{KeyId, Position};

use lock_tests::fixtures::{grid, reference_cost, solve_default, DOOR_AND_KEY, TREASURE_HUNT};

fn visited(text: &str) -> Vec<Position> {
    solve_default(&grid(text))
        .solution()
        .expect("fixture is solvable")
        .states()
        .map(|s| s.position())
        .collect()
}

#[test]
fn key_is_fetched_before_the_door() {
    let path = visited(DOOR_AND_KEY);
    let key_at = path.iter().position(|p| *p == Position::new(0, 4)).unwrap();
    let door_at = path.iter().position(|p| *p == Position::new(2, 1)).unwrap();
    assert!(key_at < door_at);
    assert_eq!(path.last(), Some(&Position::new(2, 0)));
}

#[test]
fn door_is_impassable_without_key() {
    // Same corridor with the key removed.
    let g = grid("@....\n###.#\n*A...\n");
    assert!(solve_default(&g).solution().is_none());
    assert_eq!(reference_cost(&g), None);
}

#[test]
fn one_key_opens_every_matching_door() {
    let outcome = solve_default(&grid("@bB.B*\n"));
    let solution = outcome.solution().unwrap();
    assert_eq!(solution.total_cost(), 5);
    let b = KeyId::from_letter('b').unwrap();
    assert!(solution.final_state().facts().has_key(b));
}

#[test]
fn wrong_key_does_not_open_door() {
    assert!(solve_default(&grid("@aB*\n")).solution().is_none());
}

#[test]
fn goal_waits_for_every_treasure() {
    let g = grid(TREASURE_HUNT);
    let solution = solve_default(&g).solution().unwrap().clone();
    let last = solution.final_state();
    assert_eq!(last.facts().treasure_count(), 2);
    assert_eq!(last.position(), Position::new(0, 5));
    assert_eq!(Some(solution.total_cost()), reference_cost(&g));
    // Only the final state may satisfy the goal test.
    assert!(solution
        .states()
        .take(solution.len())
        .all(|s| !s.is_goal(&g)));
}

#[test]
fn passing_the_goal_early_does_not_end_search() {
    // The goal sits between start and the only treasure.
    let g = grid("@*.$\n");
    let solution = solve_default(&g).solution().unwrap().clone();
    let labels: String = solution.actions().map(|a| a.label()).collect();
    assert_eq!(labels, "RRRLL");
    assert_eq!(solution.total_cost(), 5);
}

#[test]
fn slow_terrain_is_avoided_when_cheaper() {
    // Through one slow cell: 2 + 1 beats the four-step detour.
    assert_eq!(solve_default(&grid("@~*\n...\n")).solution().unwrap().total_cost(), 3);
    // Through three slow cells costs 7; the detour costs 6.
    let solution = solve_default(&grid("@~~~*\n.....\n")).solution().unwrap().clone();
    assert_eq!(solution.total_cost(), 6);
    assert!(solution.actions().all(|a| a.cost == 1));
}
