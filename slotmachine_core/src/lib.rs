pub mod account;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod paytable;
pub mod rng;
pub mod symbols;

pub use crate::account::Account;
pub use crate::config::{MachineConfig, COLS, MAX_BET, MAX_LINES, MIN_BET, ROWS};
pub use crate::engine::{draw_grid, Engine, SessionStats, SpinResult};
pub use crate::error::{AmountIssue, ConfigError, EngineError, EngineResult};
pub use crate::grid::Grid;
pub use crate::paytable::{evaluate, Evaluation};
pub use crate::rng::{draw_without_replacement, seeded_rng, SessionRng};
pub use crate::symbols::{Symbol, SymbolSpec, SymbolTable};
