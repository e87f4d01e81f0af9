use rust_decimal::Decimal;

use crate::account::AccountKey;
use crate::account::AccountStatus;
use crate::client::TaxId;
use crate::history::Entry;
use crate::history::History;

/// A single account of the bank: balance, status, the limit policy applied to
/// debits, and the history of its committed transactions.
///
/// The owning client is referenced by tax id and resolved through the
/// registry, never by an embedded pointer.
#[derive(Debug)]
pub struct Account {
    pub(in crate::account) key: AccountKey,
    pub(in crate::account) owner: TaxId,
    pub(in crate::account) balance: Decimal,
    pub(in crate::account) status: AccountStatus,
    pub(in crate::account) limits: Limits,
    pub(in crate::account) history: History,
}

impl Account {
    pub fn new(key: AccountKey, owner: TaxId, limits: Limits) -> Self {
        Self {
            key,
            owner,
            balance: Decimal::ZERO,
            status: AccountStatus::Active,
            limits,
            history: History::new(),
        }
    }

    pub const fn key(&self) -> &AccountKey {
        &self.key
    }

    pub const fn owner(&self) -> &TaxId {
        &self.owner
    }

    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    pub const fn status(&self) -> AccountStatus {
        self.status
    }

    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    pub const fn is_active(&self) -> bool {
        matches!(self.status, AccountStatus::Active)
    }

    pub(crate) fn record(&mut self, entry: Entry) {
        self.history.push(entry);
    }
}

/// Debit limit policy of an account. `None` means unbounded, so the base
/// account behavior is the policy with every field unset.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Maximum amount of a single withdrawal.
    pub withdrawal_cap: Option<Decimal>,
    /// Maximum committed withdrawals per calendar day.
    pub withdrawals_per_day: Option<u32>,
    /// Maximum committed outgoing PIX transfers per calendar day.
    pub pix_per_day: Option<u32>,
    /// Maximum amount of a single outgoing PIX transfer.
    pub pix_value_cap: Option<Decimal>,
}

impl Limits {
    pub const fn unbounded() -> Self {
        Self {
            withdrawal_cap: None,
            withdrawals_per_day: None,
            pix_per_day: None,
            pix_value_cap: None,
        }
    }

    /// The checking-account defaults: R$ 500.00 per withdrawal, 3 withdrawals
    /// a day, 5 PIX transfers a day of at most R$ 1000.00 each.
    pub fn checking() -> Self {
        Self {
            withdrawal_cap: Some(Decimal::new(500, 0)),
            withdrawals_per_day: Some(3),
            pix_per_day: Some(5),
            pix_value_cap: Some(Decimal::new(1000, 0)),
        }
    }
}
