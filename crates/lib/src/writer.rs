use crate::{BudgetComparison, Currency, LedgerStore, Statement};
use csv::WriterBuilder;
use rust_decimal::RoundingStrategy;
use std::io::{Cursor, Write};

type AmountBuf = [u8; 40];

fn format_amount(buf: &mut AmountBuf, amount: Currency) -> Result<&[u8], std::io::Error> {
    let mut cursor = Cursor::new(&mut buf[..]);
    write!(
        cursor,
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )?;
    let len = cursor.position() as usize;
    Ok(&buf[..len])
}

pub fn write_statement_csv<W: Write>(statement: &Statement, writer: W) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["line", "amount"])?;

    let mut amount_buf = [0u8; 40];
    for (line, amount) in statement.lines() {
        writer.write_record([line.as_bytes(), format_amount(&mut amount_buf, amount)?])?;
    }

    writer.flush()
}

pub fn write_comparison_csv<W: Write>(
    rows: &[BudgetComparison],
    writer: W,
) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["category", "actual", "budget", "variance"])?;

    let mut actual_buf = [0u8; 40];
    let mut budget_buf = [0u8; 40];
    let mut variance_buf = [0u8; 40];
    for row in rows {
        writer.write_record([
            row.label().as_bytes(),
            format_amount(&mut actual_buf, row.actual)?,
            format_amount(&mut budget_buf, row.budget)?,
            format_amount(&mut variance_buf, row.variance())?,
        ])?;
    }

    writer.flush()
}

/// Writes the entries with their amounts as typed, readable again by `parse_ledger_csv`.
pub fn write_ledger_csv<W: Write>(ledger: &LedgerStore, writer: W) -> Result<(), std::io::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(["id", "account", "type", "subtype", "amount", "depreciation"])?;

    let mut id_buf = itoa::Buffer::new();
    for entry in ledger.iter() {
        writer.write_record([
            id_buf.format(entry.id),
            entry.account.as_str(),
            <&str>::from(entry.ty),
            <&str>::from(entry.subtype),
            entry.amount.text(),
            entry.depreciation.text(),
        ])?;
    }

    writer.flush()
}
