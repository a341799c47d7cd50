mod budget;
mod catalog;
mod entry;
mod error;
mod ledger;
mod parser;
mod quick_entry;
mod session;
mod statement;
mod taxonomy;
mod writer;

/// Signed base 10 currency type, cents and any finer input digits add up exactly.
pub type Currency = rust_decimal::Decimal;

pub use rust_decimal_macros::dec as cur;

/// Largest `balance_delta` still considered balanced.
pub const BALANCE_TOLERANCE: Currency = cur!(0.01);

/// Parses free text into a currency amount.
///
/// Never fails: blank, non-numeric or out of range text is worth zero so the engine can keep
/// running while the user is still typing.
pub fn parse_amount(text: &str) -> Currency {
    let text = text.trim();
    if text.is_empty() {
        return Currency::ZERO;
    }
    text.parse().unwrap_or(Currency::ZERO)
}

pub use budget::*;
pub use catalog::*;
pub use entry::*;
pub use error::Error;
pub use ledger::*;
pub use parser::{parse_budget_csv, parse_ledger_csv, Header, LedgerRow, ParserError};
pub use quick_entry::*;
pub use session::*;
pub use statement::*;
pub use taxonomy::*;
pub use writer::{write_comparison_csv, write_ledger_csv, write_statement_csv};

/// Reads a ledger CSV and writes the derived statement as CSV.
///
/// Rows that fail to parse are skipped.
pub fn execute<R: std::io::Read, W: std::io::Write>(reader: R, writer: W) -> Result<(), Error> {
    let mut ledger = LedgerStore::default();
    let rows = parse_ledger_csv(reader)?
        .filter_map(|row| match row {
            Ok(row) => Some(row),
            Err(err) => {
                tracing::debug!(%err, "skipping ledger row");
                None
            }
        })
        .map(LedgerRow::into_draft)
        .collect::<Vec<_>>();
    ledger.bulk_append(rows);

    let statement = Statement::derive(ledger.iter());
    Ok(write_statement_csv(&statement, writer)?)
}

#[cfg(test)]
mod tests {
    use super::{cur, parse_amount, Currency};

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(parse_amount("500.00"), cur!(500));
        assert_eq!(parse_amount(" -12.5 "), cur!(-12.5));
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_amount("abc"), Currency::ZERO);
        assert_eq!(parse_amount(""), Currency::ZERO);
        assert_eq!(parse_amount("   "), Currency::ZERO);
        assert_eq!(parse_amount("12abc"), Currency::ZERO);
        assert_eq!(parse_amount("99999999999999999999999999999999"), Currency::ZERO);
    }
}
