//! `gridwalk`: solve a grid puzzle map at minimum cost.
//!
//! Exit codes: 0 solved, 1 no solution or budget exceeded, 2 error.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use gridwalk_harness::runner::{
    report_json, run, summary_lines, timeline_lines, visual_lines, RunConfig,
};
use gridwalk_kernel::operators::action::DirectionOrder;
use gridwalk_search::policy::SearchPolicy;

#[derive(Parser, Debug)]
#[command(name = "gridwalk", version, about = "Minimum-cost grid puzzle solver")]
struct Args {
    /// Map file: one row per line, `;` starts a comment line.
    map: PathBuf,

    /// Print the state stream for an external player after the summary.
    #[arg(long)]
    visual: bool,

    /// Print the canonical JSON report instead of text.
    #[arg(long, conflicts_with = "visual")]
    json: bool,

    /// Stop after this many expansions.
    #[arg(long)]
    budget: Option<u64>,

    /// Successor order as a permutation of U, R, D, L.
    #[arg(long, default_value = "URDL")]
    order: DirectionOrder,

    /// Keep successors that cannot improve a known cost.
    #[arg(long)]
    no_prune: bool,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn config(&self) -> RunConfig {
        RunConfig {
            map_path: self.map.clone(),
            policy: SearchPolicy {
                expansion_budget: self.budget,
                direction_order: self.order,
                prune_known_successors: !self.no_prune,
            },
            visual: self.visual,
            json: self.json,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = args.config();
    let report = match run(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("gridwalk: {e}");
            return ExitCode::from(2);
        }
    };

    let mut out = std::io::stdout().lock();
    let written = if config.json {
        match report_json(&report) {
            Ok(bytes) => out.write_all(&bytes).and_then(|()| writeln!(out)),
            Err(e) => {
                eprintln!("gridwalk: {e}");
                return ExitCode::from(2);
            }
        }
    } else {
        let mut lines = summary_lines(&report);
        if let Some(solution) = report.outcome.solution() {
            lines.extend(timeline_lines(solution));
            if config.visual {
                lines.extend(visual_lines(solution));
            }
        }
        lines.iter().try_for_each(|line| writeln!(out, "{line}"))
    };
    if let Err(e) = written {
        eprintln!("gridwalk: writing output: {e}");
        return ExitCode::from(2);
    }
    ExitCode::from(report.exit_code())
}
