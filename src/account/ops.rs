//! Free functions that mutate a supplied [`Account`].
//!
//! Keeping the mutations out of the data model makes mutability explicit at
//! the call site and keeps the business rules auditable in one place. Every
//! function is all-or-nothing: a rejected attempt returns an error and leaves
//! balance, status and history untouched.
//!
//! Daily limit windows are UTC calendar days taken from the timestamps of the
//! account's committed history entries; `now` supplies the day of the attempt.

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::ErrorKind;
use crate::account::Account;
use crate::account::AccountKey;
use crate::account::AccountStatus;
use crate::transaction::Amount;
use crate::transaction::TransactionKind;

#[derive(thiserror::Error, Debug)]
pub enum AccountError {
    #[error("account {key} is inactive")]
    Inactive { key: AccountKey },
    #[error("withdrawal of {amount} exceeds the per-withdrawal cap of {cap}")]
    WithdrawalCapExceeded { cap: Decimal, amount: Amount },
    #[error("daily withdrawal count of {max} already reached")]
    WithdrawalCountExceeded { max: u32 },
    #[error("pix transfer of {amount} exceeds the per-transfer cap of {cap}")]
    PixCapExceeded { cap: Decimal, amount: Amount },
    #[error("daily pix transfer count of {max} already reached")]
    PixCountExceeded { max: u32 },
    #[error("insufficient funds, need {amount} but balance is {balance}")]
    InsufficientFunds { balance: Decimal, amount: Amount },
    #[error("cannot deactivate account {key} holding a balance of {balance}")]
    NonZeroBalance { key: AccountKey, balance: Decimal },
    #[error("overflow while applying {amount} to account {key}")]
    BalanceOverflow { key: AccountKey, amount: Amount },
}

impl AccountError {
    /// Taxonomy bucket of this error, for presentation layers.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Inactive { .. } | Self::NonZeroBalance { .. } => ErrorKind::Conflict,
            Self::WithdrawalCapExceeded { .. }
            | Self::WithdrawalCountExceeded { .. }
            | Self::PixCapExceeded { .. }
            | Self::PixCountExceeded { .. } => ErrorKind::LimitExceeded,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::BalanceOverflow { .. } => ErrorKind::Validation,
        }
    }
}

/// Adds `amount` to the account's balance.
///
/// # Errors
///
/// Returns an error if:
/// - The account is inactive ([`AccountError::Inactive`]).
/// - Adding `amount` to the balance overflows ([`AccountError::BalanceOverflow`]).
pub fn deposit(account: &mut Account, amount: Amount) -> Result<(), AccountError> {
    ensure_active(account)?;
    account.balance = checked_credit(account, amount)?;
    Ok(())
}

/// Subtracts `amount` from the account's balance under the withdrawal policy.
///
/// The per-withdrawal cap and the daily count are checked before the balance,
/// in that order, so an over-cap withdrawal reports the cap error even when
/// the funds would not cover it either. The daily count only considers
/// committed withdrawals, on the same UTC calendar day as `now`.
///
/// # Errors
///
/// Returns an error if:
/// - The account is inactive ([`AccountError::Inactive`]).
/// - `amount` exceeds the per-withdrawal cap ([`AccountError::WithdrawalCapExceeded`]).
/// - Today's committed withdrawals already reached the daily maximum
///   ([`AccountError::WithdrawalCountExceeded`]).
/// - The balance is less than `amount` ([`AccountError::InsufficientFunds`]).
/// - Subtracting `amount` from the balance overflows ([`AccountError::BalanceOverflow`]).
pub fn withdraw(
    account: &mut Account,
    amount: Amount,
    now: DateTime<Utc>,
) -> Result<(), AccountError> {
    ensure_active(account)?;
    if let Some(cap) = account.limits.withdrawal_cap {
        if amount.as_inner() > cap {
            return Err(AccountError::WithdrawalCapExceeded { cap, amount });
        }
    }
    if let Some(max) = account.limits.withdrawals_per_day {
        if count_today(account, TransactionKind::Withdrawal, now) >= max as usize {
            return Err(AccountError::WithdrawalCountExceeded { max });
        }
    }
    account.balance = checked_debit(account, amount)?;
    Ok(())
}

/// Subtracts `amount` from the account's balance as an outgoing PIX transfer.
///
/// Check order mirrors [`withdraw`]: per-transfer cap, then today's committed
/// PIX-out count, then the balance.
///
/// # Errors
///
/// Returns an error if:
/// - The account is inactive ([`AccountError::Inactive`]).
/// - `amount` exceeds the per-transfer cap ([`AccountError::PixCapExceeded`]).
/// - Today's committed outgoing transfers already reached the daily maximum
///   ([`AccountError::PixCountExceeded`]).
/// - The balance is less than `amount` ([`AccountError::InsufficientFunds`]).
/// - Subtracting `amount` from the balance overflows ([`AccountError::BalanceOverflow`]).
pub fn send_pix(
    account: &mut Account,
    amount: Amount,
    now: DateTime<Utc>,
) -> Result<(), AccountError> {
    ensure_active(account)?;
    if let Some(cap) = account.limits.pix_value_cap {
        if amount.as_inner() > cap {
            return Err(AccountError::PixCapExceeded { cap, amount });
        }
    }
    if let Some(max) = account.limits.pix_per_day {
        if count_today(account, TransactionKind::PixOut, now) >= max as usize {
            return Err(AccountError::PixCountExceeded { max });
        }
    }
    account.balance = checked_debit(account, amount)?;
    Ok(())
}

/// Adds `amount` to the account's balance as an incoming PIX transfer.
/// Incoming transfers have no cap.
///
/// # Errors
///
/// Returns an error if:
/// - The account is inactive ([`AccountError::Inactive`]).
/// - Adding `amount` to the balance overflows ([`AccountError::BalanceOverflow`]).
pub fn receive_pix(account: &mut Account, amount: Amount) -> Result<(), AccountError> {
    ensure_active(account)?;
    account.balance = checked_credit(account, amount)?;
    Ok(())
}

/// Flips the account to [`AccountStatus::Inactive`], closing it for further
/// mutation. Only a drained account can be deactivated. Idempotent once
/// inactive.
///
/// # Errors
///
/// Returns [`AccountError::NonZeroBalance`] while the balance is not zero.
pub fn deactivate(account: &mut Account) -> Result<(), AccountError> {
    if !account.balance.is_zero() {
        return Err(AccountError::NonZeroBalance {
            key: account.key.clone(),
            balance: account.balance,
        });
    }
    account.status = AccountStatus::Inactive;
    Ok(())
}

fn ensure_active(account: &Account) -> Result<(), AccountError> {
    if account.is_active() {
        return Ok(());
    }
    Err(AccountError::Inactive {
        key: account.key.clone(),
    })
}

fn count_today(account: &Account, kind: TransactionKind, now: DateTime<Utc>) -> usize {
    account.history.count_on_day(kind, now.date_naive())
}

fn checked_credit(account: &Account, amount: Amount) -> Result<Decimal, AccountError> {
    account
        .balance
        .checked_add(amount.as_inner())
        .ok_or_else(|| overflow_error(account, amount))
}

fn checked_debit(account: &Account, amount: Amount) -> Result<Decimal, AccountError> {
    if account.balance < amount.as_inner() {
        return Err(AccountError::InsufficientFunds {
            balance: account.balance,
            amount,
        });
    }
    account
        .balance
        .checked_sub(amount.as_inner())
        .ok_or_else(|| overflow_error(account, amount))
}

fn overflow_error(account: &Account, amount: Amount) -> AccountError {
    AccountError::BalanceOverflow {
        key: account.key.clone(),
        amount,
    }
}
