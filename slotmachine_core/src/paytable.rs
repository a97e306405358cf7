use crate::grid::Grid;
use crate::symbols::SymbolTable;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub winnings: u64,
    /// 1-based line numbers, in row order.
    pub winning_lines: Vec<u32>,
}

/// Pays every active line whose row holds one symbol across all columns.
///
/// Line `n` is row `n`, top row first. The reference symbol is the one in
/// column 0; a win pays `value(symbol) * bet_per_line`. Lines past the last
/// row are ignored. Totals saturate at `u64::MAX`.
pub fn evaluate(grid: &Grid, table: &SymbolTable, lines: u32, bet_per_line: u64) -> Evaluation {
    let mut eval = Evaluation::default();
    let active = (lines as usize).min(grid.rows());
    for line in 0..active {
        let Some(symbol) = grid.get(0, line) else {
            continue;
        };
        if grid.row(line).all(|s| s == symbol) {
            let value = table.value(symbol).unwrap_or(0);
            eval.winnings = eval
                .winnings
                .saturating_add(value.saturating_mul(bet_per_line));
            eval.winning_lines.push(line as u32 + 1);
        }
    }
    eval
}
