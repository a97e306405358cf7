use crate::{
    account::Account,
    config::MachineConfig,
    error::{AmountIssue, ConfigError, EngineError, EngineResult},
    grid::Grid,
    paytable::{evaluate, Evaluation},
    rng::{draw_without_replacement, entropy_rng, seeded_rng, SessionRng},
};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinResult {
    pub grid: Grid,
    pub total_bet: u64,
    pub winnings: u64,
    pub winning_lines: Vec<u32>,
    /// Balance after the winnings were credited.
    pub balance: u64,
}

impl SpinResult {
    pub fn summary(&self) -> String {
        if self.winning_lines.is_empty() {
            format!("You won ${}. No winning lines.", self.winnings)
        } else {
            let lines: Vec<String> = self.winning_lines.iter().map(u32::to_string).collect();
            format!(
                "You won ${}. Winning lines: {}",
                self.winnings,
                lines.join(", ")
            )
        }
    }
}

/// Running totals over every spin of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub spins: u64,
    pub total_bet: u64,
    pub total_won: u64,
    pub winning_spins: u64,
    pub biggest_win: u64,
}

impl SessionStats {
    fn record(&mut self, total_bet: u64, winnings: u64) {
        self.spins += 1;
        self.total_bet = self.total_bet.saturating_add(total_bet);
        self.total_won = self.total_won.saturating_add(winnings);
        if winnings > 0 {
            self.winning_spins += 1;
        }
        self.biggest_win = self.biggest_win.max(winnings);
    }

    /// Return to player, percent of total bet.
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            self.total_won as f64 / self.total_bet as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Percent of spins that paid anything.
    pub fn hit_rate(&self) -> f64 {
        if self.spins > 0 {
            self.winning_spins as f64 / self.spins as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Draws a fresh grid: every column samples `rows` symbols without
/// replacement from its own copy of the weighted pool.
pub fn draw_grid<R: Rng + ?Sized>(rng: &mut R, config: &MachineConfig) -> Grid {
    let pool = config.symbols.pool();
    let columns = (0..config.cols)
        .map(|_| {
            let mut column_pool = pool.clone();
            draw_without_replacement(&mut *rng, &mut column_pool, config.rows)
        })
        .collect();
    Grid::from_drawn_columns(columns)
}

/// One player session: config, funds, RNG and running stats.
pub struct Engine<R = SessionRng> {
    config: MachineConfig,
    account: Account,
    rng: R,
    stats: SessionStats,
}

impl Engine<SessionRng> {
    pub fn new(config: MachineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, entropy_rng())
    }

    /// Reproducible session, for tests and simulation runs.
    pub fn seeded(config: MachineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, seeded_rng(seed))
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: MachineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            account: Account::new(),
            rng,
            stats: SessionStats::default(),
        })
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn balance(&self) -> u64 {
        self.account.balance()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Adds a deposit given as a decimal digit string.
    pub fn deposit(&mut self, amount: &str) -> EngineResult<u64> {
        let amount = match parse_digits(amount) {
            Some(Digits::Value(v)) => v,
            Some(Digits::Overflow) => {
                return Err(EngineError::InvalidAmount(AmountIssue::TooLarge))
            }
            None => return Err(EngineError::InvalidAmount(AmountIssue::NotANumber)),
        };
        self.deposit_amount(amount)
    }

    pub fn deposit_amount(&mut self, amount: u64) -> EngineResult<u64> {
        if amount == 0 {
            return Err(EngineError::InvalidAmount(AmountIssue::NotPositive));
        }
        let balance = self
            .account
            .credit(amount)
            .ok_or(EngineError::InvalidAmount(AmountIssue::TooLarge))?;
        debug!(amount, balance, "deposit");
        Ok(balance)
    }

    pub fn draw_grid(&mut self) -> Grid {
        draw_grid(&mut self.rng, &self.config)
    }

    pub fn evaluate(&self, grid: &Grid, lines: u32, bet_per_line: u64) -> Evaluation {
        evaluate(grid, &self.config.symbols, lines, bet_per_line)
    }

    /// Spins with a bet given as a decimal digit string.
    pub fn spin(&mut self, lines: u32, bet_per_line: &str) -> EngineResult<SpinResult> {
        let bet = match parse_digits(bet_per_line) {
            Some(Digits::Value(v)) => v,
            // any literal that overflows u64 is above every configured max
            Some(Digits::Overflow) => return Err(self.bet_out_of_range()),
            None => return Err(EngineError::InvalidBet),
        };
        self.spin_amount(lines, bet)
    }

    /// Validates the bet, debits it, draws and pays. Nothing is mutated on error.
    pub fn spin_amount(&mut self, lines: u32, bet_per_line: u64) -> EngineResult<SpinResult> {
        if !(self.config.min_bet..=self.config.max_bet).contains(&bet_per_line) {
            return Err(self.bet_out_of_range());
        }
        if !(1..=self.config.max_lines).contains(&lines) {
            return Err(EngineError::LinesOutOfRange {
                max: self.config.max_lines,
            });
        }
        let insufficient = EngineError::InsufficientFunds {
            balance: self.balance(),
        };
        // a total that overflows u64 is beyond any balance
        let total_bet = bet_per_line
            .checked_mul(u64::from(lines))
            .ok_or_else(|| insufficient.clone())?;
        self.account.debit(total_bet).ok_or(insufficient)?;

        let grid = self.draw_grid();
        let Evaluation {
            winnings,
            winning_lines,
        } = self.evaluate(&grid, lines, bet_per_line);
        let balance = self.account.settle(winnings);
        self.stats.record(total_bet, winnings);
        debug!(lines, bet_per_line, total_bet, winnings, balance, "spin");

        Ok(SpinResult {
            grid,
            total_bet,
            winnings,
            winning_lines,
            balance,
        })
    }

    fn bet_out_of_range(&self) -> EngineError {
        EngineError::BetOutOfRange {
            min: self.config.min_bet,
            max: self.config.max_bet,
        }
    }
}

enum Digits {
    Value(u64),
    Overflow,
}

/// Accepts only a non-empty run of ASCII digits: no sign, no whitespace.
fn parse_digits(s: &str) -> Option<Digits> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse::<u64>().map_or(Digits::Overflow, Digits::Value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Symbol;

    fn engine() -> Engine {
        Engine::seeded(MachineConfig::default(), 42).unwrap()
    }

    #[test]
    fn test_spin_deterministic() {
        let mut a = engine();
        let mut b = engine();
        a.deposit("100").unwrap();
        b.deposit("100").unwrap();
        for _ in 0..10 {
            assert_eq!(a.spin(3, "1").unwrap(), b.spin(3, "1").unwrap());
        }
    }

    #[test]
    fn deposit_adds_to_balance() {
        let mut e = engine();
        assert_eq!(e.deposit("100"), Ok(100));
        assert_eq!(e.deposit("50"), Ok(150));
    }

    #[test]
    fn deposit_rejects_bad_literals() {
        let mut e = engine();
        for bad in ["", "abc", "-5", "1.5", " 10", "+3"] {
            assert_eq!(
                e.deposit(bad),
                Err(EngineError::InvalidAmount(AmountIssue::NotANumber)),
                "{bad:?}"
            );
        }
        assert_eq!(
            e.deposit("0"),
            Err(EngineError::InvalidAmount(AmountIssue::NotPositive))
        );
        assert_eq!(
            e.deposit("99999999999999999999999"),
            Err(EngineError::InvalidAmount(AmountIssue::TooLarge))
        );
        assert_eq!(e.balance(), 0);
    }

    #[test]
    fn spin_checks_preconditions_in_order() {
        let mut e = engine();
        assert_eq!(e.spin(4, "x"), Err(EngineError::InvalidBet));
        assert_eq!(
            e.spin(4, "0"),
            Err(EngineError::BetOutOfRange { min: 1, max: 100 })
        );
        assert_eq!(
            e.spin(4, "101"),
            Err(EngineError::BetOutOfRange { min: 1, max: 100 })
        );
        assert_eq!(e.spin(4, "10"), Err(EngineError::LinesOutOfRange { max: 3 }));
        assert_eq!(e.spin(0, "10"), Err(EngineError::LinesOutOfRange { max: 3 }));
        assert_eq!(
            e.spin(1, "10"),
            Err(EngineError::InsufficientFunds { balance: 0 })
        );
    }

    #[test]
    fn insufficient_funds_leave_balance_untouched() {
        let mut e = engine();
        e.deposit("5").unwrap();
        assert_eq!(
            e.spin(1, "10"),
            Err(EngineError::InsufficientFunds { balance: 5 })
        );
        assert_eq!(e.balance(), 5);
        assert_eq!(e.stats().spins, 0);
    }

    fn max_value_config() -> MachineConfig {
        let json = r#"{
            "max_bet": 18446744073709551615,
            "symbols": {"A": {"count": 20, "value": 18446744073709551615}}
        }"#;
        MachineConfig::from_json_str(json).unwrap()
    }

    #[test]
    fn overflowing_total_bet_is_unaffordable() {
        let mut e = Engine::seeded(max_value_config(), 4).unwrap();
        e.deposit("100").unwrap();
        assert_eq!(
            e.spin(3, "9223372036854775807"),
            Err(EngineError::InsufficientFunds { balance: 100 })
        );
        assert_eq!(e.balance(), 100);
        assert_eq!(e.stats().spins, 0);
    }

    #[test]
    fn oversized_win_saturates_the_balance() {
        let mut e = Engine::seeded(max_value_config(), 4).unwrap();
        e.deposit("100").unwrap();
        let result = e.spin(1, "2").unwrap();
        assert_eq!(result.winning_lines, vec![1]);
        assert_eq!(result.winnings, u64::MAX);
        assert_eq!(e.balance(), u64::MAX);
    }

    #[test]
    fn spin_debits_before_crediting() {
        let mut e = engine();
        e.deposit("150").unwrap();
        let result = e.spin(3, "10").unwrap();
        assert_eq!(result.total_bet, 30);
        assert_eq!(result.balance, 120 + result.winnings);
        assert_eq!(e.balance(), result.balance);
    }

    #[test]
    fn reported_winnings_match_the_grid() {
        let mut e = engine();
        e.deposit("10000").unwrap();
        for _ in 0..200 {
            let result = e.spin(3, "2").unwrap();
            let eval = e.evaluate(&result.grid, 3, 2);
            assert_eq!(eval.winnings, result.winnings);
            assert_eq!(eval.winning_lines, result.winning_lines);
        }
    }

    #[test]
    fn drawn_columns_respect_symbol_counts() {
        let config = MachineConfig::default();
        let mut rng = seeded_rng(9);
        for _ in 0..500 {
            let grid = draw_grid(&mut rng, &config);
            assert_eq!(grid.cols(), 3);
            assert_eq!(grid.rows(), 3);
            for column in grid.columns() {
                // A has only two instances per column
                assert!(column.iter().filter(|s| **s == Symbol::A).count() <= 2);
            }
        }
    }

    #[test]
    fn exact_pool_draws_every_instance() {
        let json = r#"{"symbols": {"A": {"count": 1, "value": 5}, "B": {"count": 2, "value": 1}}}"#;
        let config = MachineConfig::from_json_str(json).unwrap();
        let mut rng = seeded_rng(11);
        for _ in 0..50 {
            let grid = draw_grid(&mut rng, &config);
            for column in grid.columns() {
                let mut sorted = column.clone();
                sorted.sort();
                assert_eq!(sorted, vec![Symbol::A, Symbol::B, Symbol::B]);
            }
        }
    }

    #[test]
    fn stats_track_spins() {
        let mut e = engine();
        e.deposit("1000").unwrap();
        let mut won = 0;
        for _ in 0..20 {
            won += e.spin(2, "5").unwrap().winnings;
        }
        let stats = e.stats();
        assert_eq!(stats.spins, 20);
        assert_eq!(stats.total_bet, 200);
        assert_eq!(stats.total_won, won);
        assert_eq!(e.balance(), 1000 - 200 + won);
    }

    #[test]
    fn summary_lists_winning_lines() {
        let grid = Grid::from_columns(vec![vec![Symbol::A]; 3]).unwrap();
        let mut result = SpinResult {
            grid,
            total_bet: 3,
            winnings: 0,
            winning_lines: vec![],
            balance: 0,
        };
        assert_eq!(result.summary(), "You won $0. No winning lines.");
        result.winnings = 12;
        result.winning_lines = vec![1, 3];
        assert_eq!(result.summary(), "You won $12. Winning lines: 1, 3");
    }

    #[test]
    fn empty_stats_report_zero_rates() {
        let stats = SessionStats::default();
        assert_eq!(stats.rtp(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
    }
}
