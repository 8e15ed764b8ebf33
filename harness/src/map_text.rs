//! Map text loader: turns a map file into a validated [`Grid`].
//!
//! One line per grid row, one symbol per cell (see
//! [`CellKind::from_symbol`]). Lines whose first character is `;` are
//! comments. Empty lines at the end of the file are ignored; a trailing
//! `\r` on any line is stripped. A line of spaces is a row of open cells.

use std::fmt;
use std::path::Path;

use gridwalk_kernel::carrier::grid::{CellKind, Grid, MalformedGridError};

/// Error loading a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The file could not be read.
    Io { path: String, detail: String },
    /// A character that is not part of the map vocabulary. `line` and
    /// `column` are 1-based and count comment lines.
    UnknownSymbol {
        line: usize,
        column: usize,
        symbol: char,
    },
    /// A row whose width differs from the first row's. `line` is the
    /// 1-based file line, counting comment lines.
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The symbols parsed but do not form a valid grid.
    Malformed(MalformedGridError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "cannot read map {path}: {detail}"),
            Self::UnknownSymbol {
                line,
                column,
                symbol,
            } => write!(f, "unknown map symbol {symbol:?} at line {line}, column {column}"),
            Self::RaggedLine {
                line,
                expected,
                found,
            } => write!(f, "line {line} has {found} cells, expected {expected}"),
            Self::Malformed(err) => write!(f, "malformed map: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MalformedGridError> for LoadError {
    fn from(err: MalformedGridError) -> Self {
        Self::Malformed(err)
    }
}

/// Parse map text.
///
/// # Errors
///
/// [`LoadError::UnknownSymbol`] for a character outside the vocabulary,
/// [`LoadError::RaggedLine`] for a row of the wrong width, and
/// [`LoadError::Malformed`] when the grid itself is invalid.
pub fn parse_map(text: &str) -> Result<Grid, LoadError> {
    let mut rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.starts_with(';'))
        .collect();
    while rows.last().is_some_and(|(_, line)| line.is_empty()) {
        rows.pop();
    }

    let mut cells: Vec<Vec<CellKind>> = Vec::with_capacity(rows.len());
    for (line_no, line) in rows {
        let row = line
            .chars()
            .enumerate()
            .map(|(col, symbol)| {
                CellKind::from_symbol(symbol).ok_or(LoadError::UnknownSymbol {
                    line: line_no,
                    column: col + 1,
                    symbol,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(expected) = cells.first().map(Vec::len) {
            if row.len() != expected {
                return Err(LoadError::RaggedLine {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
        }
        cells.push(row);
    }
    let grid = Grid::from_rows(cells)?;
    log::debug!(
        "parsed map: {}x{}, {} goal(s), {} treasure(s)",
        grid.dimensions().rows,
        grid.dimensions().cols,
        grid.goals().len(),
        grid.treasure_count()
    );
    Ok(grid)
}

/// Read and parse a map file.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be read, otherwise as [`parse_map`].
pub fn load_map_file(path: &Path) -> Result<Grid, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    parse_map(&text)
}
