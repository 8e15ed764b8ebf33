//! Determinism lock tests: identical inputs give byte-identical solution
//! and stats JSON, in process and across processes.

use std::path::Path;
use std::process::Command;

use gridwalk_search::policy::SearchPolicy;

use lock_tests::fixtures::{generated_map, grid, solve_default, solve_with, NAMED_MAPS, OPEN_3X3};

// ---------------------------------------------------------------------------
// In process
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_are_byte_identical() {
    for (name, text) in NAMED_MAPS {
        let g = grid(text);
        let first = solve_default(&g);
        let first_stats = first.stats().to_canonical_json_bytes().unwrap();
        let first_solution = first.solution().map(|s| s.to_canonical_json_bytes().unwrap());
        for _ in 1..10 {
            let other = solve_default(&g);
            assert_eq!(
                other.stats().to_canonical_json_bytes().unwrap(),
                first_stats,
                "{name}: stats bytes differ across runs"
            );
            assert_eq!(
                other.solution().map(|s| s.to_canonical_json_bytes().unwrap()),
                first_solution,
                "{name}: solution bytes differ across runs"
            );
        }
    }
}

#[test]
fn same_map_text_same_world_id() {
    let a = solve_default(&grid(&generated_map(7, 5, 5)));
    let b = solve_default(&grid(&generated_map(7, 5, 5)));
    let c = solve_default(&grid(&generated_map(8, 5, 5)));
    assert_eq!(a.stats().world_id, b.stats().world_id);
    assert_ne!(a.stats().world_id, c.stats().world_id);
}

#[test]
fn generated_maps_are_seeded() {
    assert_eq!(generated_map(42, 6, 7), generated_map(42, 6, 7));
    assert_ne!(generated_map(42, 6, 7), generated_map(43, 6, 7));
    let text = generated_map(42, 6, 7);
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().all(|r| r.chars().count() == 7));
    assert!(rows[0].starts_with('@'));
    assert!(rows[5].ends_with('*'));
}

#[test]
fn direction_order_picks_among_equal_cost_paths() {
    let g = grid(OPEN_3X3);
    let labels = |order: &str| -> String {
        let policy = SearchPolicy {
            direction_order: order.parse().unwrap(),
            ..SearchPolicy::default()
        };
        let outcome = solve_with(&g, &policy);
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.total_cost(), 4);
        solution.actions().map(|a| a.label()).collect()
    };
    assert_eq!(labels("URDL"), "RRDD");
    assert_eq!(labels("DLUR"), "DDRR");
}

// ---------------------------------------------------------------------------
// Across processes
// ---------------------------------------------------------------------------

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("solve_fixture");
    path.to_string_lossy().to_string()
}

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let mut command = Command::new(&bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }
    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "solve_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_outputs_identical() {
    let root = workspace_root();
    let tmp = std::env::temp_dir().to_string_lossy().to_string();
    let baseline = run_variant(&root, &[]);
    assert!(baseline.contains("open_3x3.total_cost=4"), "{baseline}");
    assert!(baseline.contains("sealed.outcome=no_solution"), "{baseline}");

    for (dir, env) in [
        (tmp.as_str(), &[][..]),
        (root.as_str(), &[("LC_ALL", "C")][..]),
        (root.as_str(), &[("RUST_LOG", "trace")][..]),
    ] {
        assert_eq!(
            run_variant(dir, env),
            baseline,
            "output differs (work_dir={dir}, env={env:?})"
        );
    }
}
