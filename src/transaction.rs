use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::ErrorKind;
use crate::account::Account;
use crate::account::AccountError;
use crate::account::ops;

/// This permits to avoid checks on zero or negative amounts while handling
/// transactions: once constructed, an [`Amount`] is strictly positive.
#[derive(Debug, Copy, Clone, Serialize, parse_display::Display)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Amount(Decimal);

impl TryFrom<Decimal> for Amount {
    type Error = NonPositiveAmount;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value <= Decimal::ZERO {
            return Err(NonPositiveAmount { value });
        }
        Ok(Self(value))
    }
}

impl Amount {
    pub const fn as_inner(&self) -> Decimal {
        self.0
    }
}

#[derive(thiserror::Error, Debug)]
#[error("transaction amount must be positive, got {value}")]
pub struct NonPositiveAmount {
    pub value: Decimal,
}

impl NonPositiveAmount {
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Discriminant of a [`Transaction`], also the label recorded in history
/// entries and used for daily limit windows.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, parse_display::Display)]
#[display(style = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    PixOut,
    PixIn,
}

/// A balance-mutating operation carrying its amount.
///
/// The set is closed: deposits and incoming PIX credit an account, while
/// withdrawals and outgoing PIX debit it under the account's limit policy.
#[derive(Debug, Clone, Copy, parse_display::Display)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub enum Transaction {
    #[display("tx=(deposit amount={0})")]
    Deposit(Amount),
    #[display("tx=(withdrawal amount={0})")]
    Withdrawal(Amount),
    #[display("tx=(pix_out amount={0})")]
    PixOut(Amount),
    #[display("tx=(pix_in amount={0})")]
    PixIn(Amount),
}

impl Transaction {
    pub const fn new(kind: TransactionKind, amount: Amount) -> Self {
        match kind {
            TransactionKind::Deposit => Self::Deposit(amount),
            TransactionKind::Withdrawal => Self::Withdrawal(amount),
            TransactionKind::PixOut => Self::PixOut(amount),
            TransactionKind::PixIn => Self::PixIn(amount),
        }
    }

    pub const fn kind(&self) -> TransactionKind {
        match self {
            Self::Deposit(_) => TransactionKind::Deposit,
            Self::Withdrawal(_) => TransactionKind::Withdrawal,
            Self::PixOut(_) => TransactionKind::PixOut,
            Self::PixIn(_) => TransactionKind::PixIn,
        }
    }

    pub const fn amount(&self) -> Amount {
        match self {
            Self::Deposit(amount)
            | Self::Withdrawal(amount)
            | Self::PixOut(amount)
            | Self::PixIn(amount) => *amount,
        }
    }

    /// Attempts this transaction against `account`, dispatching to the
    /// operation matching the variant. The account is mutated only when the
    /// attempt commits; recording the attempt in history is the caller's job.
    ///
    /// # Errors
    ///
    /// Propagates the [`AccountError`] of the rejected operation.
    pub fn apply(&self, account: &mut Account, now: DateTime<Utc>) -> Result<(), AccountError> {
        match self {
            Self::Deposit(amount) => ops::deposit(account, *amount),
            Self::Withdrawal(amount) => ops::withdraw(account, *amount, now),
            Self::PixOut(amount) => ops::send_pix(account, *amount, now),
            Self::PixIn(amount) => ops::receive_pix(account, *amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert2::let_assert;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;

    #[rstest]
    #[case("0.01")]
    #[case("1.2345")]
    #[case("1000")]
    fn amount_accepts_positive_values(#[case] raw: &str) {
        let_assert!(Ok(amount) = Amount::try_from(dec(raw)));
        assert_eq!(amount.as_inner(), dec(raw));
    }

    #[rstest]
    #[case("0")]
    #[case("0.00")]
    #[case("-3.50")]
    fn amount_rejects_zero_and_negative_values(#[case] raw: &str) {
        let_assert!(Err(NonPositiveAmount { value }) = Amount::try_from(dec(raw)));
        assert_eq!(value, dec(raw));
        assert_eq!(NonPositiveAmount { value }.kind(), crate::ErrorKind::Validation);
    }

    #[rstest]
    #[case(TransactionKind::Deposit)]
    #[case(TransactionKind::Withdrawal)]
    #[case(TransactionKind::PixOut)]
    #[case(TransactionKind::PixIn)]
    fn new_builds_the_variant_matching_the_kind(#[case] kind: TransactionKind) {
        let amount = Amount::try_from(dec("7.50")).unwrap();
        let tx = Transaction::new(kind, amount);
        assert_eq!(tx.kind(), kind);
        assert_eq!(tx.amount(), amount);
    }

    #[rstest]
    #[case(TransactionKind::Deposit, "deposit")]
    #[case(TransactionKind::Withdrawal, "withdrawal")]
    #[case(TransactionKind::PixOut, "pix_out")]
    #[case(TransactionKind::PixIn, "pix_in")]
    fn kind_displays_in_snake_case(#[case] kind: TransactionKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn transaction_display_includes_kind_and_amount() {
        let amount = Amount::try_from(dec("3.25")).unwrap();
        assert_eq!(
            Transaction::PixOut(amount).to_string(),
            "tx=(pix_out amount=3.25)"
        );
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }
}
