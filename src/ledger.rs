//! The bank registry and the values it hands back to callers.
//!
//! [`Bank`] is the single owner of every client and account, resolves
//! accounts by (branch, number), and is the call contract presentation
//! boundaries consume. It never prints or logs; every outcome is a value.

mod bank;
mod receipt;

pub use bank::Bank;
pub use bank::BankError;
pub use receipt::Receipt;
pub use receipt::Statement;
