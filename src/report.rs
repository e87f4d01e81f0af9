//! Statement rendering for presentation boundaries.

use std::io;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::history::Entry;
use crate::ledger::Statement;
use crate::transaction::TransactionKind;

/// Writes the statement's committed entries as CSV rows to `writer`, one row
/// per entry in submission order.
///
/// Timestamps render as `YYYY-MM-DD hh:mm:ss` (UTC). The closing balance is
/// not a row; callers take it from [`Statement::balance`].
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] when serialization or the writer
/// fails.
pub fn write_statement_csv<W: io::Write>(statement: &Statement, writer: W) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in statement.entries() {
        csv_writer.serialize(StatementRow::from(entry))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct StatementRow {
    kind: TransactionKind,
    amount: Decimal,
    timestamp: String,
}

impl From<&Entry> for StatementRow {
    fn from(entry: &Entry) -> Self {
        Self {
            kind: entry.kind(),
            amount: entry.amount().as_inner(),
            timestamp: entry.timestamp().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
