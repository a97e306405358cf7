/// Player funds for one session. Starts at zero, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Account {
    balance: u64,
}

impl Account {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Returns the new balance, or `None` on overflow.
    pub fn credit(&mut self, amount: u64) -> Option<u64> {
        self.balance = self.balance.checked_add(amount)?;
        Some(self.balance)
    }

    /// Credits spin winnings, saturating at `u64::MAX`.
    pub fn settle(&mut self, winnings: u64) -> u64 {
        self.balance = self.balance.saturating_add(winnings);
        self.balance
    }

    /// Returns the new balance, or `None` when funds are short.
    pub fn debit(&mut self, amount: u64) -> Option<u64> {
        self.balance = self.balance.checked_sub(amount)?;
        Some(self.balance)
    }
}
