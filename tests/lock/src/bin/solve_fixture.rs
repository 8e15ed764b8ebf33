//! Binary that solves every named fixture map and prints deterministic
//! key=value lines for cross-process verification.
//!
//! Usage: `solve_fixture`

use lock_tests::fixtures::{grid, solve_default, NAMED_MAPS};

fn main() {
    for (name, text) in NAMED_MAPS {
        let outcome = solve_default(&grid(text));
        let stats_digest = outcome
            .stats()
            .digest()
            .expect("stats are canonical JSON");
        println!("{name}.outcome={}", outcome.label());
        println!("{name}.stats_digest={}", stats_digest.as_str());
        if let Some(solution) = outcome.solution() {
            let digest = solution.digest().expect("solution is canonical JSON");
            println!("{name}.solution_digest={}", digest.as_str());
            println!("{name}.total_cost={}", solution.total_cost());
        }
    }
}
