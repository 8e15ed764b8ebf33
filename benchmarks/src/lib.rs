//! Shared helpers for gridwalk benchmark suites.

use gridwalk_harness::map_text::parse_map;
use gridwalk_kernel::carrier::grid::Grid;

/// Map text for an open `side x side` room with a diagonal wall broken by
/// one gap per row, start top-left and goal bottom-right.
#[must_use]
pub fn room_map(side: usize) -> String {
    let mut text = String::with_capacity(side * (side + 1));
    for row in 0..side {
        for col in 0..side {
            let symbol = match (row, col) {
                (0, 0) => '@',
                (r, c) if r == side - 1 && c == side - 1 => '*',
                (r, c) if c == r + 1 && r % 3 != 0 => '#',
                (r, c) if (r + c) % 7 == 3 => '~',
                _ => '.',
            };
            text.push(symbol);
        }
        text.push('\n');
    }
    text
}

/// Same room with a key in the far corner and its door guarding the goal.
#[must_use]
pub fn keyed_room_map(side: usize) -> String {
    let mut rows: Vec<Vec<char>> = room_map(side).lines().map(|l| l.chars().collect()).collect();
    rows[side - 1][0] = 'k';
    rows[side - 2][side - 1] = 'K';
    rows[side - 1][side - 2] = 'K';
    rows.into_iter()
        .map(|r| r.into_iter().collect::<String>() + "\n")
        .collect()
}

/// # Panics
///
/// If the generated map is rejected, which would be a helper bug.
#[must_use]
pub fn grid(text: &str) -> Grid {
    parse_map(text).unwrap_or_else(|e| panic!("benchmark map rejected: {e}"))
}
