//! Fixture maps, a pseudo-random map generator, and an exhaustive
//! reference solver that shares no code with the search engine.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use gridwalk_harness::map_text::parse_map;
use gridwalk_harness::runner::solve;
use gridwalk_kernel::carrier::grid::Grid;
use gridwalk_kernel::carrier::state::{Cost, PuzzleState, StateKey};
use gridwalk_kernel::operators::action::Direction;
use gridwalk_kernel::operators::apply::step;
use gridwalk_search::policy::SearchPolicy;
use gridwalk_search::search::SearchOutcome;

/// Open 3x3 room; optimal cost 4.
pub const OPEN_3X3: &str = "@..\n...\n..*\n";

/// Key `a` opens door `A` in front of the goal; optimal cost 10.
pub const DOOR_AND_KEY: &str = "\
@...a
###.#
*A...
";

/// Two treasures off the main corridor, slow terrain on the short route.
pub const TREASURE_HUNT: &str = "\
@.~~.*
.#..#.
.$..$.
";

/// The goal is sealed off.
pub const SEALED: &str = "\
@.#.
..#*
";

/// A door whose key lies behind it.
pub const KEY_BEHIND_DOOR: &str = "@A.a*\n";

/// Named fixtures in a fixed order.
pub const NAMED_MAPS: [(&str, &str); 5] = [
    ("open_3x3", OPEN_3X3),
    ("door_and_key", DOOR_AND_KEY),
    ("treasure_hunt", TREASURE_HUNT),
    ("sealed", SEALED),
    ("key_behind_door", KEY_BEHIND_DOOR),
];

/// # Panics
///
/// If `text` is not a valid map. Fixture maps always are.
#[must_use]
pub fn grid(text: &str) -> Grid {
    parse_map(text).unwrap_or_else(|e| panic!("fixture map rejected: {e}"))
}

/// Solve with the default policy.
///
/// # Panics
///
/// On any run error; fixtures never produce one.
#[must_use]
pub fn solve_default(grid: &Grid) -> SearchOutcome {
    solve_with(grid, &SearchPolicy::default())
}

/// # Panics
///
/// On any run error.
#[must_use]
pub fn solve_with(grid: &Grid, policy: &SearchPolicy) -> SearchOutcome {
    solve(grid, policy).unwrap_or_else(|e| panic!("run failed: {e}"))
}

/// Minimum goal cost by fixed-point relaxation over every reachable state.
///
/// Repeats full sweeps until no cost improves, so it does not depend on
/// any queue discipline.
#[must_use]
pub fn reference_cost(grid: &Grid) -> Option<Cost> {
    let initial = PuzzleState::initial(grid);
    let mut best: HashMap<StateKey, PuzzleState> = HashMap::new();
    best.insert(initial.key(), initial);
    loop {
        let mut changed = false;
        let snapshot: Vec<PuzzleState> = best.values().copied().collect();
        for state in snapshot {
            for direction in Direction::ALL {
                let Ok((_, next)) = step(grid, &state, direction) else {
                    continue;
                };
                let known_better = matches!(
                    best.get(&next.key()),
                    Some(known) if known.cost() <= next.cost()
                );
                if !known_better {
                    best.insert(next.key(), next);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    best.values()
        .filter(|s| s.is_goal(grid))
        .map(PuzzleState::cost)
        .min()
}

/// Number of distinct reachable states (position, inventory).
#[must_use]
pub fn reachable_state_count(grid: &Grid) -> usize {
    let initial = PuzzleState::initial(grid);
    let mut seen = std::collections::HashSet::from([initial.key()]);
    let mut stack = vec![initial];
    while let Some(state) = stack.pop() {
        for direction in Direction::ALL {
            if let Ok((_, next)) = step(grid, &state, direction) {
                if seen.insert(next.key()) {
                    stack.push(next);
                }
            }
        }
    }
    seen.len()
}

/// Deterministic pseudo-random map text.
///
/// Start at the top-left, goal at the bottom-right, everything else drawn
/// from walls, slow terrain, treasures and one key/door pair.
#[must_use]
pub fn generated_map(seed: u64, rows: usize, cols: usize) -> String {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut text = String::with_capacity(rows * (cols + 1));
    for row in 0..rows {
        for col in 0..cols {
            let symbol = if (row, col) == (0, 0) {
                '@'
            } else if (row, col) == (rows - 1, cols - 1) {
                '*'
            } else {
                match rng.gen_range(0..20) {
                    0..=4 => '#',
                    5..=6 => '~',
                    7 => '$',
                    8 => 'a',
                    9 => 'A',
                    _ => '.',
                }
            };
            text.push(symbol);
        }
        text.push('\n');
    }
    text
}
