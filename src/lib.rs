//! In-memory single-bank ledger: clients, accounts and the transactions that
//! mutate balances under daily withdrawal and PIX limits.
//!
//! The [`ledger::Bank`] registry owns every client and account and is the
//! call contract presentation boundaries consume. Money is
//! [`rust_decimal::Decimal`] behind the positive-only
//! [`transaction::Amount`]; every rejection is all-or-nothing, leaving
//! balance and history untouched, and history records committed transactions
//! only.

pub mod account;
pub mod client;
pub mod history;
pub mod ledger;
pub mod report;
pub mod transaction;

/// Coarse classification of every error the ledger returns, for presentation
/// layers mapping errors onto user messages or status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, parse_display::Display)]
#[display(style = "snake_case")]
pub enum ErrorKind {
    Validation,
    LimitExceeded,
    InsufficientFunds,
    NotFound,
    Conflict,
}
