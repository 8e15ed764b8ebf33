//! `PuzzleState`: one configuration of the puzzle.
//!
//! # Equality semantics
//!
//! Identity is `(position, facts)` only, the [`StateKey`]. The accumulated
//! cost rides along on [`PuzzleState`] but never participates in `Eq` or
//! `Hash`: two states reached by different paths with the same position and
//! facts are the same search node.
//!
//! States are immutable. The only public constructors are
//! [`PuzzleState::initial`] and `PuzzleState::successor` (in
//! [`crate::operators::apply`]).

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::carrier::grid::{CellKind, Grid, KeyId, Position};
use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Accumulated path cost. Move costs are never negative.
pub type Cost = u64;

/// Inventory that distinguishes otherwise identical positions.
///
/// Bit `i` of `keys` is key `KeyId(i)`; bit `i` of `treasures` is the
/// `i`-th treasure in the grid's row-major order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FactSet {
    keys: u32,
    treasures: u64,
}

impl FactSet {
    pub const EMPTY: Self = Self {
        keys: 0,
        treasures: 0,
    };

    #[must_use]
    pub const fn has_key(self, key: KeyId) -> bool {
        self.keys & (1 << key.index()) != 0
    }

    #[must_use]
    pub const fn with_key(self, key: KeyId) -> Self {
        Self {
            keys: self.keys | (1 << key.index()),
            treasures: self.treasures,
        }
    }

    #[must_use]
    pub const fn has_treasure(self, index: u8) -> bool {
        index < 64 && self.treasures & (1 << index) != 0
    }

    #[must_use]
    pub const fn with_treasure(self, index: u8) -> Self {
        Self {
            keys: self.keys,
            treasures: self.treasures | (1 << index),
        }
    }

    /// Number of treasures collected.
    #[must_use]
    pub const fn treasure_count(self) -> u32 {
        self.treasures.count_ones()
    }

    #[must_use]
    pub const fn key_bits(self) -> u32 {
        self.keys
    }

    #[must_use]
    pub const fn treasure_bits(self) -> u64 {
        self.treasures
    }

    /// Held keys in letter order.
    pub fn keys(self) -> impl Iterator<Item = KeyId> {
        (0..KeyId::COUNT)
            .filter_map(KeyId::new)
            .filter(move |k| self.has_key(*k))
    }

    /// Held keys as a lowercase string, e.g. `"ac"`.
    #[must_use]
    pub fn key_letters(self) -> String {
        self.keys().map(KeyId::letter).collect()
    }
}

/// The identity of a state: what duplicate detection keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey {
    pub position: Position,
    pub facts: FactSet,
}

/// Byte length of [`StateKey::identity_bytes`].
pub const IDENTITY_BYTE_LEN: usize = 16;

impl StateKey {
    /// Fixed little-endian layout: `row:u16 | col:u16 | keys:u32 | treasures:u64`.
    #[must_use]
    pub fn identity_bytes(&self) -> [u8; IDENTITY_BYTE_LEN] {
        let mut buf = [0u8; IDENTITY_BYTE_LEN];
        buf[0..2].copy_from_slice(&self.position.row.to_le_bytes());
        buf[2..4].copy_from_slice(&self.position.col.to_le_bytes());
        buf[4..8].copy_from_slice(&self.facts.key_bits().to_le_bytes());
        buf[8..16].copy_from_slice(&self.facts.treasure_bits().to_le_bytes());
        buf
    }

    /// Content hash of the identity bytes under the search-node domain.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::SearchNode, &self.identity_bytes())
    }
}

/// One immutable puzzle configuration plus the cost paid to reach it.
#[derive(Debug, Clone, Copy)]
pub struct PuzzleState {
    key: StateKey,
    cost: Cost,
}

impl PuzzleState {
    /// The designated initial state: on the start marker, empty inventory, zero cost.
    #[must_use]
    pub fn initial(grid: &Grid) -> Self {
        Self {
            key: StateKey {
                position: grid.start(),
                facts: FactSet::EMPTY,
            },
            cost: 0,
        }
    }

    /// Crate-internal: the move rules are the only producer of non-initial states.
    pub(crate) const fn from_parts(key: StateKey, cost: Cost) -> Self {
        Self { key, cost }
    }

    #[must_use]
    pub const fn key(&self) -> StateKey {
        self.key
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.key.position
    }

    #[must_use]
    pub const fn facts(&self) -> FactSet {
        self.key.facts
    }

    #[must_use]
    pub const fn cost(&self) -> Cost {
        self.cost
    }

    /// True on a goal cell with every treasure collected.
    #[must_use]
    pub fn is_goal(&self, grid: &Grid) -> bool {
        grid.cell_kind(self.position()) == Some(CellKind::Goal)
            && self.facts().treasure_count() as usize == grid.treasure_count()
    }

    /// Check the state invariants against `grid`: in bounds, not a wall, and
    /// no treasure bit beyond the grid's treasure count.
    #[must_use]
    pub fn is_valid_for(&self, grid: &Grid) -> bool {
        let on_floor = grid
            .cell_kind(self.position())
            .is_some_and(|kind| !kind.is_wall());
        let treasure_mask = match grid.treasure_count() {
            64 => u64::MAX,
            n => (1u64 << n) - 1,
        };
        on_floor && self.facts().treasure_bits() & !treasure_mask == 0
    }
}

impl PartialEq for PuzzleState {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PuzzleState {}

impl Hash for PuzzleState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} keys=[{}] treasures={} cost={}",
            self.position(),
            self.facts().key_letters(),
            self.facts().treasure_count(),
            self.cost
        )
    }
}
