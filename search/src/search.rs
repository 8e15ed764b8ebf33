//! The search engine: uniform-cost best-first search with relaxation.
//!
//! # Loop
//!
//! 1. Frontier empty: `Exhausted`.
//! 2. Pop the lowest `(cost, creation_order)` entry; skip it if stale.
//! 3. Popped state is a goal: `Found`, reconstruct the path.
//! 4. Expansion budget spent: `BudgetExceeded`.
//! 5. Expand, record each successor (insert, relax or discard), repeat.
//!
//! The goal test happens on pop, not on generation, so the first goal out
//! of the frontier is reached by a minimum-cost path (all costs are
//! non-negative).

use std::fmt;

use log::{debug, trace};

use gridwalk_kernel::carrier::state::PuzzleState;
use gridwalk_kernel::operators::apply::KnownCosts;

use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::node::{FrontierKey, NodeId, PredecessorLink};
use crate::path::{reconstruct, Solution};
use crate::policy::SearchPolicy;
use crate::report::{SearchStats, TerminationReason};
use crate::table::{PredecessorTable, Record};

/// Lifecycle of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Idle,
    Exploring,
    Found,
    Exhausted,
    BudgetExceeded,
    Failed,
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Exploring => "exploring",
            Self::Found => "found",
            Self::Exhausted => "exhausted",
            Self::BudgetExceeded => "budget_exceeded",
            Self::Failed => "failed",
        })
    }
}

/// The three ways a search can end without an internal failure.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Solved {
        solution: Solution,
        stats: SearchStats,
    },
    NoSolution {
        stats: SearchStats,
    },
    BudgetExceeded {
        stats: SearchStats,
    },
}

impl SearchOutcome {
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        match self {
            Self::Solved { stats, .. } | Self::NoSolution { stats } | Self::BudgetExceeded { stats } => {
                stats
            }
        }
    }

    #[must_use]
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved { solution, .. } => Some(solution),
            Self::NoSolution { .. } | Self::BudgetExceeded { .. } => None,
        }
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    /// Stable label used in reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Solved { .. } => "solved",
            Self::NoSolution { .. } => "no_solution",
            Self::BudgetExceeded { .. } => "budget_exceeded",
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    expansions: u64,
    successors_generated: u64,
    duplicates_suppressed: u64,
    successors_pruned: u64,
    relaxations: u64,
    stale_entries_skipped: u64,
}

/// One search over one world. Owns its frontier and node table; both are
/// dropped with the engine, so nothing carries over between searches.
pub struct SearchEngine<'w, W: SearchWorld + ?Sized> {
    world: &'w W,
    policy: SearchPolicy,
    status: EngineStatus,
    table: PredecessorTable,
    frontier: Frontier,
    next_creation_order: u64,
    counters: Counters,
}

impl<'w, W: SearchWorld + ?Sized> SearchEngine<'w, W> {
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `policy` fails validation.
    pub fn new(world: &'w W, policy: SearchPolicy) -> Result<Self, SearchError> {
        policy.validate()?;
        Ok(Self {
            world,
            policy,
            status: EngineStatus::Idle,
            table: PredecessorTable::new(),
            frontier: Frontier::new(),
            next_creation_order: 0,
            counters: Counters::default(),
        })
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// The node table, for inspection after a run.
    #[must_use]
    pub fn table(&self) -> &PredecessorTable {
        &self.table
    }

    /// Search from the world's initial state.
    ///
    /// # Errors
    ///
    /// See [`SearchEngine::run_from`].
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        let initial = self.world.initial_state();
        self.run_from(initial)
    }

    /// Search from `initial`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::EngineAlreadyRun`] unless the engine is idle.
    /// - [`SearchError::InvalidInitialState`] if the world rejects `initial`.
    /// - [`SearchError::FrontierInvariantViolation`] or
    ///   [`SearchError::BrokenChain`] on an internal inconsistency.
    ///
    /// Unreachable goals and spent budgets are `Ok` outcomes.
    pub fn run_from(&mut self, initial: PuzzleState) -> Result<SearchOutcome, SearchError> {
        if self.status != EngineStatus::Idle {
            return Err(SearchError::EngineAlreadyRun {
                status: self.status,
            });
        }
        self.status = EngineStatus::Exploring;
        if !self.world.validate_state(&initial) {
            self.status = EngineStatus::Failed;
            return Err(SearchError::InvalidInitialState {
                state: initial.to_string(),
            });
        }
        debug!(
            "search start: world={} initial={initial} budget={:?} order={} prune={}",
            self.world.world_id(),
            self.policy.expansion_budget,
            self.policy.direction_order,
            self.policy.prune_known_successors
        );

        let root = self.table.insert_root(initial, self.next_creation_order);
        self.enqueue(root, &initial);

        match self.explore() {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.status = EngineStatus::Failed;
                debug!("search failed: {err}");
                Err(err)
            }
        }
    }

    fn explore(&mut self) -> Result<SearchOutcome, SearchError> {
        loop {
            let Some((key, id)) = self.frontier.pop() else {
                self.status = EngineStatus::Exhausted;
                let stats = self.stats(TerminationReason::FrontierExhausted);
                debug!(
                    "search exhausted after {} expansions, {} nodes",
                    stats.expansions, stats.nodes_created
                );
                return Ok(SearchOutcome::NoSolution { stats });
            };

            let node = self.table.get(id).ok_or_else(|| SearchError::FrontierInvariantViolation {
                detail: format!("frontier entry points at missing node {id}"),
            })?;
            if node.closed || node.frontier_key() != key {
                self.counters.stale_entries_skipped += 1;
                continue;
            }
            let state = node.state;

            if self.world.is_goal(&state) {
                self.status = EngineStatus::Found;
                let solution = reconstruct(id, &self.table)?;
                let stats = self.stats(TerminationReason::GoalReached {
                    node: id,
                    cost: state.cost(),
                });
                debug!(
                    "search found goal {state} after {} expansions ({} steps)",
                    stats.expansions,
                    solution.len()
                );
                return Ok(SearchOutcome::Solved { solution, stats });
            }

            if let Some(budget) = self.policy.expansion_budget {
                if self.counters.expansions >= budget {
                    self.status = EngineStatus::BudgetExceeded;
                    let stats = self.stats(TerminationReason::ExpansionBudgetExceeded { budget });
                    debug!("search stopped: {}", stats.termination);
                    return Ok(SearchOutcome::BudgetExceeded { stats });
                }
            }

            self.expand(id, &state)?;
        }
    }

    fn expand(&mut self, id: NodeId, state: &PuzzleState) -> Result<(), SearchError> {
        let node = self.table.get_mut(id).ok_or_else(|| SearchError::FrontierInvariantViolation {
            detail: format!("node {id} vanished before expansion"),
        })?;
        node.closed = true;
        self.counters.expansions += 1;

        let known: Option<&dyn KnownCosts> = if self.policy.prune_known_successors {
            Some(&self.table)
        } else {
            None
        };
        let expansion = self.world.expand(state, &self.policy.direction_order, known);
        self.counters.successors_generated += expansion.successors.len() as u64;
        self.counters.successors_pruned += expansion.pruned;
        trace!(
            "expand {id} {state}: {} successors, {} pruned",
            expansion.successors.len(),
            expansion.pruned
        );

        for (action, next) in expansion.successors {
            let link = PredecessorLink { parent: id, action };
            match self.table.record(next, link, self.next_creation_order) {
                Record::Inserted(child) => self.enqueue(child, &next),
                Record::Relaxed(child) => {
                    self.counters.relaxations += 1;
                    trace!("relax {child} to cost {}", next.cost());
                    self.enqueue(child, &next);
                }
                Record::Dominated(_) => self.counters.duplicates_suppressed += 1,
            }
        }
        Ok(())
    }

    /// Push `child` with the creation order `record` just stamped on it.
    fn enqueue(&mut self, child: NodeId, state: &PuzzleState) {
        let creation_order = self.take_creation_order();
        self.frontier.push(
            FrontierKey {
                cost: state.cost(),
                creation_order,
            },
            child,
        );
    }

    fn take_creation_order(&mut self) -> u64 {
        let order = self.next_creation_order;
        self.next_creation_order += 1;
        order
    }

    fn stats(&self, termination: TerminationReason) -> SearchStats {
        SearchStats {
            world_id: self.world.world_id().to_string(),
            expansions: self.counters.expansions,
            nodes_created: self.table.len() as u64,
            successors_generated: self.counters.successors_generated,
            duplicates_suppressed: self.counters.duplicates_suppressed,
            successors_pruned: self.counters.successors_pruned,
            relaxations: self.counters.relaxations,
            stale_entries_skipped: self.counters.stale_entries_skipped,
            frontier_high_water: self.frontier.high_water(),
            frontier_pushes: self.frontier.pushed(),
            termination,
        }
    }
}
