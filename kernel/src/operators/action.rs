//! Actions: the closed set of moves an agent can make.

use std::fmt;
use std::str::FromStr;

/// One of the four compass moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// `(d_row, d_col)` for one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Right => 'R',
            Self::Down => 'D',
            Self::Left => 'L',
        }
    }

    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'R' => Some(Self::Right),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectionOrderError {
    /// The text was not exactly four direction letters.
    WrongLength { found: usize },
    UnknownLetter { letter: char },
    Repeated { direction: Direction },
}

impl fmt::Display for DirectionOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { found } => {
                write!(f, "direction order needs 4 letters, got {found}")
            }
            Self::UnknownLetter { letter } => {
                write!(f, "unknown direction letter {letter:?} (expected U, R, D, L)")
            }
            Self::Repeated { direction } => {
                write!(f, "direction {direction} appears more than once")
            }
        }
    }
}

impl std::error::Error for DirectionOrderError {}

/// The order successors are generated in. Fixes which of several
/// equal-cost solutions a search returns.
///
/// Always a permutation of [`Direction::ALL`] when built through
/// [`DirectionOrder::new`] or `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectionOrder([Direction; 4]);

impl DirectionOrder {
    /// Up, Right, Down, Left.
    pub const URDL: Self = Self(Direction::ALL);

    /// # Errors
    ///
    /// [`DirectionOrderError::Repeated`] if a direction occurs twice.
    pub fn new(order: [Direction; 4]) -> Result<Self, DirectionOrderError> {
        for (i, d) in order.iter().enumerate() {
            if order[..i].contains(d) {
                return Err(DirectionOrderError::Repeated { direction: *d });
            }
        }
        Ok(Self(order))
    }

    #[must_use]
    pub const fn as_array(&self) -> [Direction; 4] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.0.iter().copied()
    }

    /// True when every direction appears exactly once.
    #[must_use]
    pub fn is_permutation(&self) -> bool {
        Direction::ALL.iter().all(|d| self.0.contains(d))
    }
}

impl Default for DirectionOrder {
    fn default() -> Self {
        Self::URDL
    }
}

impl FromStr for DirectionOrder {
    type Err = DirectionOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s.trim().chars().collect();
        if letters.len() != 4 {
            return Err(DirectionOrderError::WrongLength {
                found: letters.len(),
            });
        }
        let mut order = Direction::ALL;
        for (slot, letter) in order.iter_mut().zip(letters) {
            *slot = Direction::from_letter(letter)
                .ok_or(DirectionOrderError::UnknownLetter { letter })?;
        }
        Self::new(order)
    }
}

impl fmt::Display for DirectionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|d| write!(f, "{}", d.letter()))
    }
}

/// Closed set of action kinds. Moving is the only one today; new rules add
/// variants here and the move generator matches them exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Move(Direction),
}

/// One legal move plus what it costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub kind: ActionKind,
    pub cost: u32,
}

impl Action {
    #[must_use]
    pub const fn step(direction: Direction, cost: u32) -> Self {
        Self {
            kind: ActionKind::Move(direction),
            cost,
        }
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        match self.kind {
            ActionKind::Move(d) => d,
        }
    }

    /// Stable short label used in reports, e.g. `"R"`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            ActionKind::Move(d) => d.letter().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Move(d) => write!(f, "{d}({})", self.cost),
        }
    }
}
