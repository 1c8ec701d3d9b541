use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// A transfer of `amount` from `sender` to `recipient`.
///
/// Field order is part of the block hash preimage; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Reject transactions with blank parties. Amounts are not checked
    /// against any balance.
    pub fn validate(&self) -> Result<()> {
        if self.sender.trim().is_empty() {
            return Err(LedgerError::InvalidTransaction("sender required".into()));
        }
        if self.recipient.trim().is_empty() {
            return Err(LedgerError::InvalidTransaction("recipient required".into()));
        }
        Ok(())
    }
}
