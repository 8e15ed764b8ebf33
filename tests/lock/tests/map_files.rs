//! Map file lock tests: loading from disk, comment handling, load errors,
//! and the file-to-report pipeline.

use std::fs;

use gridwalk_harness::map_text::{load_map_file, LoadError};
use gridwalk_harness::runner::{report_json, run, timeline_lines, RunConfig, RunError};
use gridwalk_kernel::carrier::grid::{MalformedGridError, Position};

fn write_map(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn load_with_comments_and_crlf() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_map(
        &dir,
        "commented.txt",
        "; door maze\r\n@.a\r\n; middle\r\n#A#\r\n.*.\r\n\r\n",
    );
    let g = load_map_file(&path).unwrap();
    assert_eq!(g.dimensions().rows, 3);
    assert_eq!(g.dimensions().cols, 3);
    assert_eq!(g.start(), Position::new(0, 0));
    assert_eq!(g.goals(), &[Position::new(2, 1)]);
    assert_eq!(g.render(), "@.a\n#A#\n.*.");
}

#[test]
fn final_row_of_spaces_carries_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_map(&dir, "spaces.txt", "@#*\n.#.\n   \n");
    let report = run(&RunConfig::new(&path)).unwrap();
    assert_eq!(report.grid.dimensions().rows, 3);
    let solution = report.outcome.solution().unwrap();
    assert_eq!(solution.total_cost(), 6);
    let labels: String = solution.actions().map(|a| a.label()).collect();
    assert_eq!(labels, "DDRRUU");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_map_file(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn structural_defects_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("no_start.txt", "..*\n", MalformedGridError::MissingStart),
        ("no_goal.txt", "@..\n", MalformedGridError::MissingGoal),
    ];
    for (name, text, expected) in cases {
        let err = load_map_file(&write_map(&dir, name, text)).unwrap_err();
        match err {
            LoadError::Malformed(found) => assert_eq!(found, expected, "{name}"),
            other => panic!("{name}: expected malformed grid, got {other}"),
        }
    }
    let err = load_map_file(&write_map(&dir, "two_starts.txt", "@@*\n")).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Malformed(MalformedGridError::MultipleStarts { .. })
    ));
    let err = load_map_file(&write_map(&dir, "ragged.txt", "; room\n@..\n.*\n")).unwrap_err();
    assert_eq!(
        err,
        LoadError::RaggedLine {
            line: 3,
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn unknown_symbol_reports_line_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_map(&dir, "bad.txt", "; header\n@..\n.%*\n");
    let err = load_map_file(&path).unwrap_err();
    assert!(matches!(
        err,
        LoadError::UnknownSymbol {
            line: 3,
            column: 2,
            symbol: '%'
        }
    ));
}

#[test]
fn file_to_report_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_map(&dir, "door.txt", lock_tests::fixtures::DOOR_AND_KEY);
    let report = run(&RunConfig::new(&path)).unwrap();
    assert_eq!(report.exit_code(), 0);

    let solution = report.outcome.solution().unwrap();
    let timeline = timeline_lines(solution);
    assert_eq!(timeline.len(), solution.len());
    assert_eq!(timeline[3], "t=4 RIGHT -> (0,4) +key a");
    assert_eq!(timeline.last().unwrap(), "t=10 LEFT -> (2,0)");

    let json: serde_json::Value = serde_json::from_slice(&report_json(&report).unwrap()).unwrap();
    assert_eq!(json["outcome"], "solved");
    assert_eq!(json["solution"]["length"], 10);
    assert_eq!(json["stats"]["world_id"], report.world_id.as_str());

    let again = run(&RunConfig::new(&path)).unwrap();
    assert_eq!(report_json(&again).unwrap(), report_json(&report).unwrap());
}

#[test]
fn unsolvable_file_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_map(&dir, "sealed.txt", lock_tests::fixtures::SEALED);
    let report = run(&RunConfig::new(&path)).unwrap();
    assert_eq!(report.exit_code(), 1);
    let json: serde_json::Value = serde_json::from_slice(&report_json(&report).unwrap()).unwrap();
    assert_eq!(json["outcome"], "no_solution");
    assert!(json["solution"].is_null());
}

#[test]
fn load_errors_propagate_through_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_map(&dir, "empty.txt", "; nothing\n\n");
    let err = run(&RunConfig::new(&path)).unwrap_err();
    assert!(matches!(
        err,
        RunError::Load(LoadError::Malformed(MalformedGridError::EmptyGrid))
    ));
}
