//! Machine configuration: bet limits, grid shape and the symbol table.

use crate::error::ConfigError;
use crate::symbols::SymbolTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const MAX_LINES: u32 = 3;
pub const MIN_BET: u64 = 1;
pub const MAX_BET: u64 = 100;
pub const ROWS: usize = 3;
pub const COLS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MachineConfig {
    pub max_lines: u32,
    pub min_bet: u64,
    pub max_bet: u64,
    pub rows: usize,
    pub cols: usize,
    pub symbols: SymbolTable,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_lines: MAX_LINES,
            min_bet: MIN_BET,
            max_bet: MAX_BET,
            rows: ROWS,
            cols: COLS,
            symbols: SymbolTable::classic(),
        }
    }
}

impl MachineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(invalid("grid needs at least one row and one column"));
        }
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(invalid(format!(
                "bet range {}..={} is empty or starts at zero",
                self.min_bet, self.max_bet
            )));
        }
        if self.max_lines == 0 || self.max_lines as usize > self.rows {
            return Err(invalid(format!(
                "max_lines must be within 1..={}, got {}",
                self.rows, self.max_lines
            )));
        }
        if self.symbols.is_empty() {
            return Err(invalid("symbol table is empty"));
        }
        for (symbol, spec) in self.symbols.iter() {
            if spec.count == 0 || spec.value == 0 {
                return Err(invalid(format!(
                    "symbol {symbol} needs a positive count and value"
                )));
            }
        }
        // every column draws `rows` symbols without replacement
        if self.symbols.total_count() < self.rows as u64 {
            return Err(invalid(format!(
                "symbol pool holds {} symbols but a column needs {}",
                self.symbols.total_count(),
                self.rows
            )));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}
