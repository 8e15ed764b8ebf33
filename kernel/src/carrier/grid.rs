//! `Grid`: the immutable board a search runs over.
//!
//! A `Grid` is validated once by [`Grid::load`] and never mutated afterwards.
//! Every search component borrows it read-only.
//!
//! # Layout
//!
//! Cells are stored row-major in a flat `Vec<CellKind>`; `(row, col)` maps to
//! `row * cols + col`. Treasures are indexed in the same row-major order,
//! which fixes the bit each treasure occupies in a [`FactSet`](super::state::FactSet).

use std::fmt;

use crate::proof::hash::{canonical_hash, ContentHash, HashDomain};

/// Largest number of treasures a grid may carry (one bit each in a `u64`).
pub const MAX_TREASURES: usize = 64;

/// A cell coordinate. Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Grid extent. Both sides are positive for any loaded grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub rows: u16,
    pub cols: u16,
}

impl Dimensions {
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Number of cells (`rows * cols`).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Identifies a key and the doors it opens: `0` is `a`/`A`, `25` is `z`/`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(u8);

impl KeyId {
    /// Number of distinct keys.
    pub const COUNT: u8 = 26;

    /// Build from an index in `0..26`.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Build from a key or door letter, case-insensitive.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        if letter.is_ascii_alphabetic() {
            #[allow(clippy::cast_possible_truncation)]
            let index = (letter.to_ascii_lowercase() as u32 - 'a' as u32) as u8;
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Lowercase letter (the key symbol).
    #[must_use]
    pub const fn letter(self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What occupies a cell. Fixed for the lifetime of a grid.
///
/// | Symbol | Kind | Entry cost |
/// |---|---|---|
/// | `.` or space | `Open` | 1 |
/// | `#` | `Wall` | impassable |
/// | `@` | `Start` | 1 |
/// | `*` | `Goal` | 1 |
/// | `~` | `Restricted` | 2 |
/// | `$` | `Treasure` | 1 |
/// | `a`–`z` | `Key` | 1 |
/// | `A`–`Z` | `Door` | 1, needs the matching key |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Open,
    Wall,
    Start,
    Goal,
    /// Slow terrain: costs two steps to enter.
    Restricted,
    /// Collectible; every treasure must be held before a goal counts.
    Treasure,
    Key(KeyId),
    Door(KeyId),
}

impl CellKind {
    /// Parse a map symbol. Returns `None` for unknown symbols.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | ' ' => Some(Self::Open),
            '#' => Some(Self::Wall),
            '@' => Some(Self::Start),
            '*' => Some(Self::Goal),
            '~' => Some(Self::Restricted),
            '$' => Some(Self::Treasure),
            c if c.is_ascii_lowercase() => KeyId::from_letter(c).map(Self::Key),
            c if c.is_ascii_uppercase() => KeyId::from_letter(c).map(Self::Door),
            _ => None,
        }
    }

    /// The canonical map symbol (`Open` renders as `.`).
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Open => '.',
            Self::Wall => '#',
            Self::Start => '@',
            Self::Goal => '*',
            Self::Restricted => '~',
            Self::Treasure => '$',
            Self::Key(k) => k.letter(),
            Self::Door(k) => k.letter().to_ascii_uppercase(),
        }
    }

    /// Cost of stepping into this cell, or `None` for permanent walls.
    ///
    /// Doors report their cost here; whether the agent may pass is a
    /// fact-set question answered by the move rules.
    #[must_use]
    pub const fn entry_cost(self) -> Option<u32> {
        match self {
            Self::Wall => None,
            Self::Restricted => Some(2),
            Self::Open
            | Self::Start
            | Self::Goal
            | Self::Treasure
            | Self::Key(_)
            | Self::Door(_) => Some(1),
        }
    }

    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Structural map defect. Fatal to the run; never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedGridError {
    /// Zero rows or zero columns.
    EmptyGrid,
    /// `cells.len()` disagrees with the declared dimensions.
    CellCountMismatch { expected: usize, found: usize },
    /// A row's length differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A side exceeds `u16::MAX`.
    DimensionsTooLarge { rows: usize, cols: usize },
    MissingStart,
    MultipleStarts { positions: Vec<Position> },
    MissingGoal,
    TooManyTreasures { count: usize, max: usize },
}

impl fmt::Display for MalformedGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid has no cells"),
            Self::CellCountMismatch { expected, found } => {
                write!(f, "expected {expected} cells from dimensions, found {found}")
            }
            Self::RaggedRow {
                row,
                expected,
                found,
            } => write!(f, "row {row} has {found} cells, expected {expected}"),
            Self::DimensionsTooLarge { rows, cols } => {
                write!(f, "grid {rows}x{cols} exceeds the supported size")
            }
            Self::MissingStart => write!(f, "grid has no start marker"),
            Self::MultipleStarts { positions } => {
                let list: Vec<String> = positions.iter().map(ToString::to_string).collect();
                write!(f, "grid has {} start markers: {}", positions.len(), list.join(" "))
            }
            Self::MissingGoal => write!(f, "grid has no goal marker"),
            Self::TooManyTreasures { count, max } => {
                write!(f, "grid has {count} treasures, at most {max} are supported")
            }
        }
    }
}

impl std::error::Error for MalformedGridError {}

/// The static board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<CellKind>,
    start: Position,
    goals: Vec<Position>,
    /// Row-major, so `binary_search` yields the treasure's bit index.
    treasures: Vec<Position>,
}

impl Grid {
    /// Validate raw row-major cells against `dimensions`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedGridError`] if the dimensions are empty or disagree
    /// with the cell count, if there is not exactly one start, if there is no
    /// goal, or if there are more than [`MAX_TREASURES`] treasures.
    pub fn load(cells: Vec<CellKind>, dimensions: Dimensions) -> Result<Self, MalformedGridError> {
        if dimensions.rows == 0 || dimensions.cols == 0 {
            return Err(MalformedGridError::EmptyGrid);
        }
        if cells.len() != dimensions.cell_count() {
            return Err(MalformedGridError::CellCountMismatch {
                expected: dimensions.cell_count(),
                found: cells.len(),
            });
        }

        let mut starts = Vec::new();
        let mut goals = Vec::new();
        let mut treasures = Vec::new();
        for (i, cell) in cells.iter().enumerate() {
            let pos = position_of(i, dimensions);
            match cell {
                CellKind::Start => starts.push(pos),
                CellKind::Goal => goals.push(pos),
                CellKind::Treasure => treasures.push(pos),
                _ => {}
            }
        }

        let start = match starts.as_slice() {
            [] => return Err(MalformedGridError::MissingStart),
            [only] => *only,
            _ => return Err(MalformedGridError::MultipleStarts { positions: starts }),
        };
        if goals.is_empty() {
            return Err(MalformedGridError::MissingGoal);
        }
        if treasures.len() > MAX_TREASURES {
            return Err(MalformedGridError::TooManyTreasures {
                count: treasures.len(),
                max: MAX_TREASURES,
            });
        }

        Ok(Self {
            dimensions,
            cells,
            start,
            goals,
            treasures,
        })
    }

    /// Validate a list of rows. Every row must have the first row's length.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedGridError::RaggedRow`] or
    /// [`MalformedGridError::DimensionsTooLarge`] before delegating to
    /// [`Grid::load`] for the marker checks.
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Result<Self, MalformedGridError> {
        let Some(first) = rows.first() else {
            return Err(MalformedGridError::EmptyGrid);
        };
        let width = first.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(MalformedGridError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }

        let (Ok(row_count), Ok(col_count)) = (u16::try_from(rows.len()), u16::try_from(width))
        else {
            return Err(MalformedGridError::DimensionsTooLarge {
                rows: rows.len(),
                cols: width,
            });
        };

        let dimensions = Dimensions::new(row_count, col_count);
        Self::load(rows.into_iter().flatten().collect(), dimensions)
    }

    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.dimensions.rows && pos.col < self.dimensions.cols
    }

    /// Cell kind at `pos`, or `None` when out of bounds.
    #[must_use]
    pub fn cell_kind(&self, pos: Position) -> Option<CellKind> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn goals(&self) -> &[Position] {
        &self.goals
    }

    #[must_use]
    pub fn treasure_count(&self) -> usize {
        self.treasures.len()
    }

    /// Bit index of the treasure at `pos`, if there is one.
    #[must_use]
    pub fn treasure_index(&self, pos: Position) -> Option<u8> {
        self.treasures
            .binary_search(&pos)
            .ok()
            .and_then(|i| u8::try_from(i).ok())
    }

    /// The cell `d_row`/`d_col` away from `pos`, if it lies inside the grid.
    #[must_use]
    pub fn offset(&self, pos: Position, d_row: i32, d_col: i32) -> Option<Position> {
        let row = u16::try_from(i32::from(pos.row) + d_row).ok()?;
        let col = u16::try_from(i32::from(pos.col) + d_col).ok()?;
        let target = Position::new(row, col);
        self.in_bounds(target).then_some(target)
    }

    /// Map text for this grid, one line per row, canonical symbols.
    #[must_use]
    pub fn render(&self) -> String {
        let cols = self.dimensions.cols as usize;
        let mut out = String::with_capacity(self.cells.len() + self.dimensions.rows as usize);
        for (i, row) in self.cells.chunks(cols).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.symbol()));
        }
        out
    }

    /// Content hash of [`Grid::render`]; stable across loads of the same map.
    #[must_use]
    pub fn layout_digest(&self) -> ContentHash {
        canonical_hash(HashDomain::GridLayout, self.render().as_bytes())
    }

    fn index(&self, pos: Position) -> usize {
        pos.row as usize * self.dimensions.cols as usize + pos.col as usize
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn position_of(index: usize, dimensions: Dimensions) -> Position {
    let cols = dimensions.cols as usize;
    Position::new((index / cols) as u16, (index % cols) as u16)
}
