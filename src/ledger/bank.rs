use std::collections::HashMap;
use std::collections::HashSet;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::ErrorKind;
use crate::account::Account;
use crate::account::AccountError;
use crate::account::AccountKey;
use crate::account::AccountNumber;
use crate::account::Branch;
use crate::account::Limits;
use crate::account::ops;
use crate::client::Client;
use crate::client::TaxId;
use crate::ledger::Receipt;
use crate::ledger::Statement;
use crate::transaction::Transaction;

#[cfg(test)]
#[path = "tests/bank_tests.rs"]
mod bank_tests;

/// The registry owning every client and account of the bank.
///
/// Accounts are keyed by (branch, number); numbers are assigned sequentially
/// starting at 1 and never reused. The registry is the only component that
/// creates clients and accounts, which keeps the client-owns-account
/// invariant local to [`Bank::open_account_with`].
pub struct Bank {
    clients: HashMap<TaxId, Client>,
    accounts: HashMap<AccountKey, Account>,
    branches: HashSet<Branch>,
    next_number: u32,
}

impl Bank {
    pub fn new(branches: impl IntoIterator<Item = Branch>) -> Self {
        Self {
            clients: HashMap::new(),
            accounts: HashMap::new(),
            branches: branches.into_iter().collect(),
            next_number: 1,
        }
    }

    /// Registers a new client under `tax_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::DuplicateClient`] when the tax id is already
    /// registered.
    pub fn add_client(
        &mut self,
        tax_id: TaxId,
        name: String,
        birth_date: NaiveDate,
        address: String,
    ) -> Result<(), BankError> {
        if self.clients.contains_key(&tax_id) {
            return Err(BankError::DuplicateClient { tax_id });
        }
        self.clients
            .insert(tax_id.clone(), Client::new(tax_id, name, birth_date, address));
        Ok(())
    }

    /// Opens a checking account (default limits) for an existing client.
    ///
    /// # Errors
    ///
    /// See [`Bank::open_account_with`].
    pub fn open_account(&mut self, tax_id: &TaxId, branch: Branch) -> Result<AccountKey, BankError> {
        self.open_account_with(tax_id, branch, Limits::checking())
    }

    /// Opens an account with an explicit limit policy and returns its key.
    /// The account number is the next in the registry's sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No client is registered under `tax_id` ([`BankError::UnknownClient`]).
    /// - `branch` is not one of the bank's branches ([`BankError::InvalidBranch`]).
    pub fn open_account_with(
        &mut self,
        tax_id: &TaxId,
        branch: Branch,
        limits: Limits,
    ) -> Result<AccountKey, BankError> {
        let Some(client) = self.clients.get_mut(tax_id) else {
            return Err(BankError::UnknownClient {
                tax_id: tax_id.clone(),
            });
        };
        if !self.branches.contains(&branch) {
            return Err(BankError::InvalidBranch { branch });
        }
        let number = AccountNumber(self.next_number);
        self.next_number += 1;
        let key = AccountKey::new(branch, number);
        client.attach_account(key.clone());
        self.accounts
            .insert(key.clone(), Account::new(key.clone(), tax_id.clone(), limits));
        Ok(key)
    }

    pub fn find_client(&self, tax_id: &TaxId) -> Option<&Client> {
        self.clients.get(tax_id)
    }

    pub fn find_account(&self, branch: &Branch, number: AccountNumber) -> Option<&Account> {
        self.accounts.get(&AccountKey::new(branch.clone(), number))
    }

    /// All registered clients, in no particular order.
    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    /// All accounts, in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Submits `transaction` against the account at (`branch`, `number`),
    /// stamped with the current time.
    ///
    /// # Errors
    ///
    /// See [`Bank::submit_at`].
    pub fn submit(
        &mut self,
        branch: &Branch,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<Receipt, BankError> {
        self.submit_at(branch, number, transaction, Utc::now())
    }

    /// Same as [`Bank::submit`] with the commit timestamp supplied by the
    /// caller; daily limit windows derive from this timestamp's UTC calendar
    /// day.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account exists at (`branch`, `number`) ([`BankError::AccountNotFound`]).
    /// - The owning client's submission is rejected (the lifted
    ///   [`AccountError`]); balance and history stay untouched.
    pub fn submit_at(
        &mut self,
        branch: &Branch,
        number: AccountNumber,
        transaction: Transaction,
        now: DateTime<Utc>,
    ) -> Result<Receipt, BankError> {
        let key = AccountKey::new(branch.clone(), number);
        let Some(account) = self.accounts.get_mut(&key) else {
            return Err(BankError::AccountNotFound { key });
        };
        let client = self
            .clients
            .get(account.owner())
            .expect("every account is opened for a registered client");
        client.submit(account, transaction, now)?;
        Ok(Receipt {
            kind: transaction.kind(),
            amount: transaction.amount(),
            balance: account.balance(),
            timestamp: now,
        })
    }

    /// The account's committed entries plus its current balance.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::AccountNotFound`] when no account exists at the
    /// key.
    pub fn statement(&self, branch: &Branch, number: AccountNumber) -> Result<Statement, BankError> {
        let key = AccountKey::new(branch.clone(), number);
        let Some(account) = self.accounts.get(&key) else {
            return Err(BankError::AccountNotFound { key });
        };
        Ok(Statement::new(
            account.balance(),
            account.history().entries().to_vec(),
        ))
    }

    /// Deactivates the account at (`branch`, `number`).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No account exists at the key ([`BankError::AccountNotFound`]).
    /// - The balance is not zero (the lifted [`AccountError::NonZeroBalance`]).
    pub fn deactivate(&mut self, branch: &Branch, number: AccountNumber) -> Result<(), BankError> {
        let key = AccountKey::new(branch.clone(), number);
        let Some(account) = self.accounts.get_mut(&key) else {
            return Err(BankError::AccountNotFound { key });
        };
        ops::deactivate(account)?;
        Ok(())
    }
}

impl Default for Bank {
    /// A bank with the standard branch set 0001, 0002 and 0003.
    fn default() -> Self {
        Self::new(["0001", "0002", "0003"].map(|code| Branch(code.to_owned())))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BankError {
    #[error("client {tax_id} is already registered")]
    DuplicateClient { tax_id: TaxId },
    #[error("no client registered under {tax_id}")]
    UnknownClient { tax_id: TaxId },
    #[error("{branch} is not a branch of this bank")]
    InvalidBranch { branch: Branch },
    #[error("no account {key} registered")]
    AccountNotFound { key: AccountKey },
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl BankError {
    /// Taxonomy bucket of this error, for presentation layers.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateClient { .. } => ErrorKind::Conflict,
            Self::UnknownClient { .. }
            | Self::InvalidBranch { .. }
            | Self::AccountNotFound { .. } => ErrorKind::NotFound,
            Self::Account(error) => error.kind(),
        }
    }
}
