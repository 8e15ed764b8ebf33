//! Typed search errors.
//!
//! `SearchError` is for failures only. "No solution" and "budget exceeded"
//! are ordinary outcomes and travel in
//! [`SearchOutcome`](crate::search::SearchOutcome) instead.

use crate::path::BrokenChainError;
use crate::search::EngineStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy cannot drive a search.
    InvalidPolicy { detail: String },
    /// The world rejected the state the search was asked to start from.
    InvalidInitialState { state: String },
    /// `run` was called on an engine that is no longer idle.
    EngineAlreadyRun { status: EngineStatus },
    /// The frontier or node table disagreed with itself.
    FrontierInvariantViolation { detail: String },
    /// Path reconstruction found a broken predecessor chain.
    BrokenChain(BrokenChainError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::InvalidInitialState { state } => {
                write!(f, "initial state {state} is not valid for this world")
            }
            Self::EngineAlreadyRun { status } => {
                write!(f, "search engine already ran (status: {status})")
            }
            Self::FrontierInvariantViolation { detail } => {
                write!(f, "frontier invariant violated: {detail}")
            }
            Self::BrokenChain(err) => write!(f, "path reconstruction failed: {err}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BrokenChain(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BrokenChainError> for SearchError {
    fn from(err: BrokenChainError) -> Self {
        Self::BrokenChain(err)
    }
}
