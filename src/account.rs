use parse_display::Display;

mod model;
pub mod ops;

pub use model::Account;
pub use model::Limits;
pub use ops::AccountError;

/// Bank branch code; together with [`AccountNumber`] it forms the unique key
/// of an account.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Display)]
pub struct Branch(pub String);

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Display)]
pub struct AccountNumber(pub u32);

#[derive(Debug, Clone, Hash, PartialEq, Eq, Display)]
#[display("{branch}/{number}")]
pub struct AccountKey {
    pub branch: Branch,
    pub number: AccountNumber,
}

impl AccountKey {
    pub const fn new(branch: Branch, number: AccountNumber) -> Self {
        Self { branch, number }
    }
}

/// An inactive account is terminal for mutation but still queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(style = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}
