use crate::error::{EngineError, EngineResult};
use crate::symbols::Symbol;
use std::fmt;

/// Reel window stored column-major: `columns[col][row]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<Vec<Symbol>>,
}

impl Grid {
    pub fn from_columns(columns: Vec<Vec<Symbol>>) -> EngineResult<Self> {
        let rows = columns.first().map_or(0, Vec::len);
        if columns.iter().any(|c| c.len() != rows) {
            return Err(EngineError::RaggedGrid);
        }
        Ok(Self { columns })
    }

    /// Columns drawn to the same length by the engine.
    pub(crate) fn from_drawn_columns(columns: Vec<Vec<Symbol>>) -> Self {
        debug_assert!(Self::from_columns(columns.clone()).is_ok());
        Self { columns }
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn columns(&self) -> &[Vec<Symbol>] {
        &self.columns
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Symbol> {
        self.columns.get(col)?.get(row).copied()
    }

    /// Symbols across one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Symbol> + '_ {
        self.columns.iter().filter_map(move |c| c.get(row).copied())
    }

    /// Row-major text: cells joined by `" | "`, rows by newlines.
    pub fn render(&self) -> String {
        let lines: Vec<String> = (0..self.rows())
            .map(|r| {
                self.row(r)
                    .map(Symbol::as_str)
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect();
        lines.join("\n").trim_end().to_string()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    #[test]
    fn renders_row_major() {
        let grid = Grid::from_columns(vec![vec![A, B, C], vec![A, D, C], vec![A, B, D]]).unwrap();
        assert_eq!(grid.render(), "A | A | A\nB | D | B\nC | C | D");
        assert_eq!(grid.to_string(), grid.render());
    }

    #[test]
    fn rejects_ragged_columns() {
        assert_eq!(
            Grid::from_columns(vec![vec![A, B], vec![A]]),
            Err(EngineError::RaggedGrid)
        );
    }

    #[test]
    fn empty_grid_renders_empty() {
        let grid = Grid::from_columns(Vec::new()).unwrap();
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.render(), "");
    }
}
