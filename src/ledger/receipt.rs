use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::history::Entry;
use crate::transaction::Amount;
use crate::transaction::TransactionKind;

/// Proof of a committed transaction: what was applied, the balance right
/// after it, and the recorded timestamp.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Receipt {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub balance: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// An account's committed entries in submission order plus its current
/// balance.
#[derive(Debug, Clone)]
pub struct Statement {
    balance: Decimal,
    entries: Vec<Entry>,
}

impl Statement {
    pub(crate) fn new(balance: Decimal, entries: Vec<Entry>) -> Self {
        Self { balance, entries }
    }

    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// True when the account has no committed transactions yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
