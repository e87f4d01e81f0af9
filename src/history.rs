//! Append-only log of an account's committed transactions.
//!
//! Entries are appended at commit time only, so insertion order is
//! chronological and the log never contains a rejected attempt. Daily limit
//! checks re-scan the log through [`History::on_day`]; the iterator is lazy
//! and restartable, one scan per check.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::transaction::Amount;
use crate::transaction::TransactionKind;

/// A single committed transaction: what happened, for how much, and when.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    kind: TransactionKind,
    amount: Amount,
    timestamp: DateTime<Utc>,
}

impl Entry {
    pub const fn new(kind: TransactionKind, amount: Amount, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            amount,
            timestamp,
        }
    }

    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub const fn amount(&self) -> Amount {
        self.amount
    }

    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of the given kind committed on `day` (UTC calendar day of the
    /// recorded timestamp).
    pub fn on_day(
        &self,
        kind: TransactionKind,
        day: NaiveDate,
    ) -> impl Iterator<Item = &Entry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.kind() == kind && entry.timestamp().date_naive() == day)
    }

    pub fn count_on_day(&self, kind: TransactionKind, day: NaiveDate) -> usize {
        self.on_day(kind, day).count()
    }
}
