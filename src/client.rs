use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::account::Account;
use crate::account::AccountError;
use crate::account::AccountKey;
use crate::history::Entry;
use crate::transaction::Transaction;

/// Tax id of a client; the unique identity key within the bank.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, parse_display::Display)]
pub struct TaxId(pub String);

/// A registered client: identity data plus the keys of the accounts it owns.
/// Clients are created by the registry and never deleted.
#[derive(Debug)]
pub struct Client {
    tax_id: TaxId,
    name: String,
    birth_date: NaiveDate,
    address: String,
    accounts: Vec<AccountKey>,
}

impl Client {
    pub fn new(tax_id: TaxId, name: String, birth_date: NaiveDate, address: String) -> Self {
        Self {
            tax_id,
            name,
            birth_date,
            address,
            accounts: Vec::new(),
        }
    }

    pub const fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Keys of the owned accounts, in opening order.
    pub fn accounts(&self) -> &[AccountKey] {
        &self.accounts
    }

    pub fn owns(&self, key: &AccountKey) -> bool {
        self.accounts.contains(key)
    }

    pub(crate) fn attach_account(&mut self, key: AccountKey) {
        self.accounts.push(key);
    }

    /// Submits `transaction` against one of this client's accounts and, only
    /// when it commits, appends the matching entry to the account's history.
    /// History therefore never records a failed attempt.
    ///
    /// # Panics
    ///
    /// Panics when `account` does not belong to this client: resolving the
    /// right owner is the registry's job, so a mismatch is caller misuse, not
    /// a user-facing failure.
    ///
    /// # Errors
    ///
    /// Propagates the [`AccountError`] of a rejected transaction; the account
    /// is left untouched in that case.
    pub fn submit(
        &self,
        account: &mut Account,
        transaction: Transaction,
        now: DateTime<Utc>,
    ) -> Result<(), AccountError> {
        assert!(
            self.owns(account.key()),
            "client {} does not own account {}",
            self.tax_id,
            account.key(),
        );
        transaction.apply(account, now)?;
        account.record(Entry::new(transaction.kind(), transaction.amount(), now));
        Ok(())
    }
}
