use std::str::FromStr;

use assert2::let_assert;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::TimeZone;
use chrono::Utc;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use crate::ErrorKind;
use crate::account::AccountError;
use crate::account::AccountNumber;
use crate::account::AccountStatus;
use crate::account::Branch;
use crate::client::TaxId;
use crate::ledger::Bank;
use crate::ledger::BankError;
use crate::transaction::Amount;
use crate::transaction::Transaction;
use crate::transaction::TransactionKind;

#[test]
fn add_client_rejects_a_duplicate_tax_id() {
    let mut bank = Bank::default();
    register_ana(&mut bank).unwrap();
    let res = register_ana(&mut bank);
    let_assert!(Err(BankError::DuplicateClient { tax_id }) = res);
    assert_eq!(tax_id, ana());
    assert_eq!(bank.clients().count(), 1);
}

#[test]
fn open_account_requires_a_registered_client() {
    let mut bank = Bank::default();
    let res = bank.open_account(&ana(), branch("0001"));
    let_assert!(Err(BankError::UnknownClient { tax_id }) = res);
    assert_eq!(tax_id, ana());
}

#[test]
fn open_account_requires_a_known_branch() {
    let mut bank = Bank::default();
    register_ana(&mut bank).unwrap();
    let res = bank.open_account(&ana(), branch("9999"));
    let_assert!(Err(BankError::InvalidBranch { branch: rejected }) = res);
    assert_eq!(rejected, branch("9999"));
    assert!(bank.accounts().next().is_none());
}

#[test]
fn account_numbers_are_sequential_across_branches() {
    let mut bank = Bank::default();
    register_ana(&mut bank).unwrap();
    let first = bank.open_account(&ana(), branch("0001")).unwrap();
    let second = bank.open_account(&ana(), branch("0002")).unwrap();
    let third = bank.open_account(&ana(), branch("0001")).unwrap();
    assert_eq!(first.number, AccountNumber(1));
    assert_eq!(second.number, AccountNumber(2));
    assert_eq!(third.number, AccountNumber(3));
    assert_eq!(bank.find_client(&ana()).unwrap().accounts().len(), 3);
}

#[test]
fn finders_return_none_when_absent() {
    let bank = Bank::default();
    assert!(bank.find_client(&ana()).is_none());
    assert!(bank.find_account(&branch("0001"), AccountNumber(1)).is_none());
}

#[test]
fn submit_returns_a_receipt_and_records_the_entry() {
    let (mut bank, key) = bank_with_account();
    let now = ts(14, 9);

    let receipt = bank
        .submit_at(&key.branch, key.number, deposit("1000.00"), now)
        .unwrap();
    assert_eq!(receipt.kind, TransactionKind::Deposit);
    assert_eq!(receipt.amount.as_inner(), dec("1000.00"));
    assert_eq!(receipt.balance, dec("1000.00"));
    assert_eq!(receipt.timestamp, now);

    let statement = bank.statement(&key.branch, key.number).unwrap();
    assert_eq!(statement.balance(), dec("1000.00"));
    assert_eq!(statement.entries().len(), 1);
    assert_eq!(statement.entries()[0].kind(), TransactionKind::Deposit);
}

#[test]
fn submit_on_an_unknown_account_errors() {
    let mut bank = Bank::default();
    let res = bank.submit(&branch("0001"), AccountNumber(42), deposit("1.00"));
    let_assert!(Err(BankError::AccountNotFound { key }) = res);
    assert_eq!(key.number, AccountNumber(42));
}

#[test]
fn a_rejected_submission_leaves_balance_and_history_unchanged() {
    let (mut bank, key) = bank_with_account();
    bank.submit_at(&key.branch, key.number, deposit("100.00"), ts(14, 9))
        .unwrap();

    let res = bank.submit_at(&key.branch, key.number, withdrawal("100.01"), ts(14, 10));
    let_assert!(Err(BankError::Account(AccountError::InsufficientFunds { .. })) = res);

    let statement = bank.statement(&key.branch, key.number).unwrap();
    assert_eq!(statement.balance(), dec("100.00"));
    assert_eq!(statement.entries().len(), 1);
}

#[test]
fn statement_of_a_fresh_account_is_empty() {
    let (bank, key) = bank_with_account();
    let statement = bank.statement(&key.branch, key.number).unwrap();
    assert!(statement.is_empty());
    assert_eq!(statement.balance(), Decimal::ZERO);
}

#[test]
fn history_length_tracks_successful_submissions_in_order() {
    let (mut bank, key) = bank_with_account();
    bank.submit_at(&key.branch, key.number, deposit("300.00"), ts(14, 9))
        .unwrap();
    bank.submit_at(&key.branch, key.number, withdrawal("50.00"), ts(14, 10))
        .unwrap();
    // Over the 1000 pix cap: rejected, must not show up below.
    let res = bank.submit_at(&key.branch, key.number, pix_out("2000.00"), ts(14, 11));
    let_assert!(Err(BankError::Account(AccountError::PixCapExceeded { .. })) = res);
    bank.submit_at(&key.branch, key.number, pix_in("10.00"), ts(14, 12))
        .unwrap();

    let statement = bank.statement(&key.branch, key.number).unwrap();
    let kinds: Vec<_> = statement.entries().iter().map(|entry| entry.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::Deposit,
            TransactionKind::Withdrawal,
            TransactionKind::PixIn,
        ]
    );
    assert_eq!(statement.balance(), dec("260.00"));
}

#[test]
fn daily_withdrawal_quota_is_spent_by_commits_and_resets_next_day() {
    let (mut bank, key) = bank_with_account();
    bank.submit_at(&key.branch, key.number, deposit("5000.00"), ts(13, 8))
        .unwrap();
    for hour in 9..12 {
        bank.submit_at(&key.branch, key.number, withdrawal("100.00"), ts(14, hour))
            .unwrap();
    }

    let res = bank.submit_at(&key.branch, key.number, withdrawal("100.00"), ts(14, 12));
    let_assert!(Err(BankError::Account(AccountError::WithdrawalCountExceeded { max: 3 })) = res);

    bank.submit_at(&key.branch, key.number, withdrawal("100.00"), ts(15, 9))
        .unwrap();
    let statement = bank.statement(&key.branch, key.number).unwrap();
    assert_eq!(statement.balance(), dec("4600.00"));
}

#[test]
fn deactivate_conflicts_until_the_balance_is_drained() {
    let (mut bank, key) = bank_with_account();
    bank.submit_at(&key.branch, key.number, deposit("10.00"), ts(14, 9))
        .unwrap();

    let res = bank.deactivate(&key.branch, key.number);
    let_assert!(Err(BankError::Account(AccountError::NonZeroBalance { balance, .. })) = res);
    assert_eq!(balance, dec("10.00"));
    let account = bank.find_account(&key.branch, key.number).unwrap();
    assert_eq!(account.status(), AccountStatus::Active);

    bank.submit_at(&key.branch, key.number, withdrawal("10.00"), ts(14, 10))
        .unwrap();
    bank.deactivate(&key.branch, key.number).unwrap();
    let account = bank.find_account(&key.branch, key.number).unwrap();
    assert_eq!(account.status(), AccountStatus::Inactive);

    let res = bank.submit_at(&key.branch, key.number, deposit("1.00"), ts(14, 11));
    let_assert!(Err(BankError::Account(AccountError::Inactive { .. })) = res);
    // Still queryable.
    let statement = bank.statement(&key.branch, key.number).unwrap();
    assert_eq!(statement.entries().len(), 2);
}

#[test]
fn errors_classify_into_the_taxonomy() {
    let (mut bank, key) = bank_with_account();
    let not_found = bank.statement(&branch("0001"), AccountNumber(99)).unwrap_err();
    assert_eq!(not_found.kind(), ErrorKind::NotFound);

    let limit = bank
        .submit_at(&key.branch, key.number, pix_out("2000.00"), ts(14, 9))
        .unwrap_err();
    assert_eq!(limit.kind(), ErrorKind::LimitExceeded);

    let funds = bank
        .submit_at(&key.branch, key.number, withdrawal("1.00"), ts(14, 9))
        .unwrap_err();
    assert_eq!(funds.kind(), ErrorKind::InsufficientFunds);

    let conflict = register_ana(&mut bank).unwrap_err();
    assert_eq!(conflict.kind(), ErrorKind::Conflict);
}

fn bank_with_account() -> (Bank, crate::account::AccountKey) {
    let mut bank = Bank::default();
    register_ana(&mut bank).unwrap();
    let key = bank.open_account(&ana(), branch("0001")).unwrap();
    (bank, key)
}

fn register_ana(bank: &mut Bank) -> Result<(), BankError> {
    bank.add_client(
        ana(),
        "Ana Souza".to_owned(),
        NaiveDate::from_ymd_opt(1990, 5, 14).unwrap(),
        "Rua das Flores, 10 - Centro - São Paulo/SP".to_owned(),
    )
}

fn ana() -> TaxId {
    TaxId("52998224725".to_owned())
}

fn branch(code: &str) -> Branch {
    Branch(code.to_owned())
}

fn deposit(value: &str) -> Transaction {
    Transaction::Deposit(amount(value))
}

fn withdrawal(value: &str) -> Transaction {
    Transaction::Withdrawal(amount(value))
}

fn pix_out(value: &str) -> Transaction {
    Transaction::PixOut(amount(value))
}

fn pix_in(value: &str) -> Transaction {
    Transaction::PixIn(amount(value))
}

fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

fn amount(value: &str) -> Amount {
    Amount::try_from(dec(value)).unwrap()
}

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}
