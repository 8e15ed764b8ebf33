//! `GridWorld`: a loaded map exposed to the search engine.

use gridwalk_kernel::carrier::grid::Grid;
use gridwalk_kernel::carrier::state::PuzzleState;
use gridwalk_kernel::operators::action::DirectionOrder;
use gridwalk_kernel::operators::apply::{successors, KnownCosts};

use gridwalk_search::contract::{Expansion, SearchWorld};

/// A single-agent maze over one grid.
///
/// The world id is derived from the grid layout digest, so two loads of
/// the same map share an id.
pub struct GridWorld {
    grid: Grid,
    id: String,
}

impl GridWorld {
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let digest = grid.layout_digest();
        let id = format!("grid:{}", &digest.hex_digest()[..16]);
        Self { grid, id }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl SearchWorld for GridWorld {
    fn world_id(&self) -> &str {
        &self.id
    }

    fn initial_state(&self) -> PuzzleState {
        PuzzleState::initial(&self.grid)
    }

    fn validate_state(&self, state: &PuzzleState) -> bool {
        state.is_valid_for(&self.grid)
    }

    fn expand(
        &self,
        state: &PuzzleState,
        order: &DirectionOrder,
        known: Option<&dyn KnownCosts>,
    ) -> Expansion {
        let mut moves = successors(&self.grid, state, order);
        if let Some(known) = known {
            moves = moves.pruned_by(known);
        }
        let successors = moves.by_ref().collect();
        Expansion {
            successors,
            pruned: moves.pruned(),
        }
    }

    fn is_goal(&self, state: &PuzzleState) -> bool {
        state.is_goal(&self.grid)
    }
}
