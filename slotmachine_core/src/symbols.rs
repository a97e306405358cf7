use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    A,
    B,
    C,
    D,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::A => "A",
            Symbol::B => "B",
            Symbol::C => "C",
            Symbol::D => "D",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Draw weight and payout multiplier of one symbol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolSpec {
    pub count: u32,
    pub value: u64,
}

/// Weighting and payout table keyed by symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SymbolTable(pub BTreeMap<Symbol, SymbolSpec>);

impl SymbolTable {
    /// The classic three-reel table: rarer symbols pay more.
    pub fn classic() -> Self {
        let entries = [
            (Symbol::A, 2, 5),
            (Symbol::B, 4, 4),
            (Symbol::C, 6, 3),
            (Symbol::D, 8, 2),
        ];
        Self(
            entries
                .into_iter()
                .map(|(symbol, count, value)| (symbol, SymbolSpec { count, value }))
                .collect(),
        )
    }

    pub fn get(&self, symbol: Symbol) -> Option<SymbolSpec> {
        self.0.get(&symbol).copied()
    }

    pub fn value(&self, symbol: Symbol) -> Option<u64> {
        self.get(symbol).map(|spec| spec.value)
    }

    pub fn total_count(&self) -> u64 {
        self.0.values().map(|spec| u64::from(spec.count)).sum()
    }

    /// Flattened multiset: every symbol repeated `count` times, in symbol order.
    pub fn pool(&self) -> Vec<Symbol> {
        self.0
            .iter()
            .flat_map(|(symbol, spec)| std::iter::repeat(*symbol).take(spec.count as usize))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, SymbolSpec)> + '_ {
        self.0.iter().map(|(symbol, spec)| (*symbol, *spec))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_pool_matches_counts() {
        let table = SymbolTable::classic();
        let pool = table.pool();
        assert_eq!(pool.len(), 20);
        assert_eq!(table.total_count(), 20);
        assert_eq!(pool.iter().filter(|s| **s == Symbol::A).count(), 2);
        assert_eq!(pool.iter().filter(|s| **s == Symbol::D).count(), 8);
        assert_eq!(pool[0], Symbol::A);
    }

    #[test]
    fn table_reads_symbol_keyed_json() {
        let json = r#"{"A": {"count": 1, "value": 9}, "D": {"count": 3, "value": 1}}"#;
        let table: SymbolTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.value(Symbol::A), Some(9));
        assert_eq!(table.get(Symbol::B), None);
        assert_eq!(table.total_count(), 4);
    }
}
