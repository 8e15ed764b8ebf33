//! Run pipeline: map file → grid world → search → verified outcome.
//!
//! ```text
//! load_map_file() → GridWorld::new() → SearchEngine::run()
//!   → replay check of the solution → RunReport
//! ```
//!
//! Output formatting for the command (summary, timeline, visual stream,
//! JSON) lives here too, as plain functions returning lines or bytes.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use log::{info, warn};
use serde_json::{json, Value};

use gridwalk_kernel::carrier::grid::Grid;
use gridwalk_kernel::carrier::state::PuzzleState;
use gridwalk_kernel::proof::canon::{canonical_json_bytes, CanonError};
use gridwalk_kernel::proof::replay::{verify_states, ReplayError, ReplayVerdict};
use gridwalk_search::contract::SearchWorld;
use gridwalk_search::error::SearchError;
use gridwalk_search::path::{state_to_json, Solution};
use gridwalk_search::policy::SearchPolicy;
use gridwalk_search::search::{SearchEngine, SearchOutcome};

use crate::map_text::{load_map_file, LoadError};
use crate::worlds::grid_world::GridWorld;

/// Everything the command hands to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub map_path: PathBuf,
    pub policy: SearchPolicy,
    /// Stream every solution state for an external player.
    pub visual: bool,
    /// Print canonical JSON instead of the text summary.
    pub json: bool,
}

impl RunConfig {
    #[must_use]
    pub fn new(map_path: impl Into<PathBuf>) -> Self {
        Self {
            map_path: map_path.into(),
            policy: SearchPolicy::default(),
            visual: false,
            json: false,
        }
    }
}

/// Error during a run.
#[derive(Debug)]
pub enum RunError {
    Load(LoadError),
    Search(SearchError),
    /// The solution's actions could not be replayed.
    Replay(ReplayError),
    /// The solution's actions replay to different states than it records.
    ReplayDivergence { detail: String },
    Canon(CanonError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "{e}"),
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Replay(e) => write!(f, "solution replay failed: {e}"),
            Self::ReplayDivergence { detail } => write!(f, "solution replay diverged: {detail}"),
            Self::Canon(e) => write!(f, "canonical JSON error: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Replay(e) => Some(e),
            Self::Canon(e) => Some(e),
            Self::ReplayDivergence { .. } => None,
        }
    }
}

impl From<LoadError> for RunError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<ReplayError> for RunError {
    fn from(e: ReplayError) -> Self {
        Self::Replay(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub world_id: String,
    pub grid: Grid,
    pub outcome: SearchOutcome,
}

impl RunReport {
    /// Process exit code: 0 when solved, 1 for no solution or budget exceeded.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.outcome.is_solved())
    }
}

/// Load the configured map and solve it.
///
/// # Errors
///
/// [`RunError`] on load failure, internal search failure, or a solution
/// that does not survive replay.
pub fn run(config: &RunConfig) -> Result<RunReport, RunError> {
    let grid = load_map_file(&config.map_path)?;
    info!(
        "loaded {} ({}x{})",
        config.map_path.display(),
        grid.dimensions().rows,
        grid.dimensions().cols
    );
    let world = GridWorld::new(grid);
    let outcome = solve_world(&world, &config.policy)?;
    Ok(RunReport {
        world_id: world.world_id().to_string(),
        grid: world.grid().clone(),
        outcome,
    })
}

/// Solve an already-loaded grid.
///
/// # Errors
///
/// As [`run`], minus loading.
pub fn solve(grid: &Grid, policy: &SearchPolicy) -> Result<SearchOutcome, RunError> {
    solve_world(&GridWorld::new(grid.clone()), policy)
}

fn solve_world(world: &GridWorld, policy: &SearchPolicy) -> Result<SearchOutcome, RunError> {
    let mut engine = SearchEngine::new(world, policy.clone())?;
    let outcome = engine.run()?;
    let stats = outcome.stats();
    match &outcome {
        SearchOutcome::Solved { solution, .. } => {
            verify_solution(world.grid(), solution)?;
            info!(
                "{}: solved, cost {} in {} steps ({} expansions, {} nodes)",
                stats.world_id,
                solution.total_cost(),
                solution.len(),
                stats.expansions,
                stats.nodes_created
            );
        }
        SearchOutcome::NoSolution { .. } | SearchOutcome::BudgetExceeded { .. } => {
            warn!(
                "{}: {} ({} expansions, {} nodes)",
                stats.world_id, stats.termination, stats.expansions, stats.nodes_created
            );
        }
    }
    Ok(outcome)
}

/// Replay `solution` through the move rules and require an exact match.
///
/// # Errors
///
/// [`RunError::Replay`] or [`RunError::ReplayDivergence`].
pub fn verify_solution(grid: &Grid, solution: &Solution) -> Result<(), RunError> {
    let actions: Vec<_> = solution.actions().collect();
    let recorded: Vec<_> = solution.states().collect();
    match verify_states(grid, &solution.initial, &actions, &recorded)? {
        ReplayVerdict::Match => Ok(()),
        ReplayVerdict::Divergence {
            index,
            recorded,
            replayed,
        } => Err(RunError::ReplayDivergence {
            detail: format!("state {index}: recorded {recorded}, replayed {replayed}"),
        }),
        ReplayVerdict::LengthMismatch { recorded, replayed } => Err(RunError::ReplayDivergence {
            detail: format!("{recorded} recorded states, {replayed} replayed"),
        }),
    }
}

/// One line per step: `t=<cumulative cost> <DIR> -> (row,col) [+key a] [+treasure]`.
#[must_use]
pub fn timeline_lines(solution: &Solution) -> Vec<String> {
    let mut before = solution.initial;
    solution
        .steps
        .iter()
        .map(|step| {
            let after = step.state;
            let mut line = format!(
                "t={} {} -> {}",
                after.cost(),
                step.action.direction().name(),
                after.position()
            );
            for key in after.facts().keys().filter(|k| !before.facts().has_key(*k)) {
                let _ = write!(line, " +key {key}");
            }
            if after.facts().treasure_count() > before.facts().treasure_count() {
                line.push_str(" +treasure");
            }
            before = after;
            line
        })
        .collect()
}

/// The state stream handed to an external player, initial state first.
#[must_use]
pub fn visual_lines(solution: &Solution) -> Vec<String> {
    solution
        .states()
        .enumerate()
        .map(|(step, s)| {
            format!(
                "step={step} row={} col={} keys={} treasures={} cost={}",
                s.position().row,
                s.position().col,
                s.facts().key_letters(),
                s.facts().treasure_count(),
                s.cost()
            )
        })
        .collect()
}

/// Human-readable result block.
#[must_use]
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let stats = report.outcome.stats();
    let mut lines = vec![format!("world: {}", report.world_id)];
    match report.outcome.solution() {
        Some(solution) => {
            let path: String = solution.actions().map(|a| a.label()).collect();
            lines.push(format!(
                "solved: cost {} in {} steps",
                solution.total_cost(),
                solution.len()
            ));
            lines.push(format!("moves: {path}"));
        }
        None => lines.push(format!("unsolved: {}", stats.termination)),
    }
    lines.push(format!(
        "expansions: {}  nodes: {}  duplicates: {}  relaxations: {}  frontier peak: {}",
        stats.expansions,
        stats.nodes_created,
        stats.duplicates_suppressed,
        stats.relaxations,
        stats.frontier_high_water
    ));
    lines
}

#[must_use]
pub fn report_json_value(report: &RunReport) -> Value {
    json!({
        "outcome": report.outcome.label(),
        "solution": report.outcome.solution().map_or(Value::Null, Solution::to_json_value),
        "stats": report.outcome.stats().to_json_value(),
        "start": state_to_json(&PuzzleState::initial(&report.grid)),
    })
}

/// Canonical JSON bytes of [`report_json_value`].
///
/// # Errors
///
/// [`RunError::Canon`] if the report contains a float (it never does).
pub fn report_json(report: &RunReport) -> Result<Vec<u8>, RunError> {
    Ok(canonical_json_bytes(&report_json_value(report))?)
}
