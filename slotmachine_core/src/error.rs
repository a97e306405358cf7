use thiserror::Error;

/// Why a deposit literal was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountIssue {
    #[error("Please enter a valid number.")]
    NotANumber,
    #[error("Deposit must be greater than 0.")]
    NotPositive,
    #[error("Deposit is too large.")]
    TooLarge,
}

/// Input validation failures. None of them touch the balance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    InvalidAmount(AmountIssue),
    #[error("Please enter a valid bet amount.")]
    InvalidBet,
    #[error("Bet must be between ${min} and ${max}.")]
    BetOutOfRange { min: u64, max: u64 },
    #[error("Lines must be between 1 and {max}.")]
    LinesOutOfRange { max: u32 },
    #[error("Not enough balance! You have ${balance}.")]
    InsufficientFunds { balance: u64 },
    #[error("grid columns must all hold the same number of rows")]
    RaggedGrid,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
