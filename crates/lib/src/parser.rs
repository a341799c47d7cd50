use crate::{
    catalog, default_subtype, is_valid_subtype, AccountSubtype, AccountType, BudgetCategory,
    BudgetTargets, EntryDraft,
};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug)]
pub enum Header {
    Type,
    Amount,
    Category,
    Budget,
}

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Column `{0:?}` missing")]
    MissingHeader(Header),
    #[error("Invalid value in type field: `{0}`")]
    InvalidTypeField(String),
    #[error("Unknown budget category: `{0}`")]
    InvalidBudgetCategory(String),
    #[error(transparent)]
    CSVError(#[from] csv::Error),
}

const MISSING_TYPE_HEADER: ParserError = ParserError::MissingHeader(Header::Type);
const MISSING_AMOUNT_HEADER: ParserError = ParserError::MissingHeader(Header::Amount);
const MISSING_CATEGORY_HEADER: ParserError = ParserError::MissingHeader(Header::Category);
const MISSING_BUDGET_HEADER: ParserError = ParserError::MissingHeader(Header::Budget);

/// One imported ledger line, classified but not yet in a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub account: String,
    pub ty: AccountType,
    pub subtype: AccountSubtype,
    pub amount: String,
    pub depreciation: String,
}

impl LedgerRow {
    pub fn into_draft(self) -> EntryDraft {
        EntryDraft::new(self.account, self.ty, self.subtype, self.amount)
            .with_depreciation(self.depreciation)
    }
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.trim(Trim::All).flexible(true);
    builder
}

fn header_index<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<HashMap<String, u8>, ParserError> {
    Ok(reader
        .headers()?
        .into_iter()
        .map(str::to_ascii_lowercase)
        .zip(0u8..u8::MAX)
        .collect())
}

/// Parses a ledger CSV with `type` and `amount` columns and optional `account`, `subtype` and
/// `depreciation` columns, in any order.
pub fn parse_ledger_csv<R: std::io::Read>(
    reader: R,
) -> Result<impl Iterator<Item = Result<LedgerRow, ParserError>>, ParserError> {
    let mut reader = reader_builder().from_reader(reader);
    let mut header_to_index = header_index(&mut reader)?;

    // u8 column index per field, optional columns may be absent
    let field_map = FieldToIndexMap {
        account: header_to_index.remove("account"),
        ty: header_to_index.remove("type").ok_or(MISSING_TYPE_HEADER)?,
        subtype: header_to_index.remove("subtype"),
        amount: header_to_index
            .remove("amount")
            .ok_or(MISSING_AMOUNT_HEADER)?,
        depreciation: header_to_index.remove("depreciation"),
    };

    Ok(reader.into_records().map(move |res| {
        res.map_err(ParserError::from)
            .and_then(|rec| parse_row(&rec, field_map))
    }))
}

#[derive(Clone, Copy)]
struct FieldToIndexMap {
    account: Option<u8>,
    ty: u8,
    subtype: Option<u8>,
    amount: u8,
    depreciation: Option<u8>,
}

fn field(record: &StringRecord, index: Option<u8>) -> &str {
    index
        .and_then(|index| record.get(index.into()))
        .unwrap_or_default()
}

#[inline]
fn parse_row(record: &StringRecord, field_map: FieldToIndexMap) -> Result<LedgerRow, ParserError> {
    let account = field(record, field_map.account);
    let ty_text = field(record, Some(field_map.ty));
    let subtype_text = field(record, field_map.subtype);

    let (ty, fallback_subtype) = if ty_text.is_empty() {
        // blank type, classify by the catalog
        let known = catalog::lookup(account)
            .ok_or_else(|| ParserError::InvalidTypeField(ty_text.to_string()))?;
        (known.ty, known.subtype)
    } else {
        let ty: AccountType = ty_text
            .parse()
            .map_err(|_| ParserError::InvalidTypeField(ty_text.to_string()))?;
        (ty, default_subtype(ty))
    };

    let subtype = subtype_text
        .parse::<AccountSubtype>()
        .ok()
        .filter(|subtype| is_valid_subtype(ty, *subtype))
        .unwrap_or(fallback_subtype);

    Ok(LedgerRow {
        account: account.to_string(),
        ty,
        subtype,
        amount: field(record, Some(field_map.amount)).to_string(),
        depreciation: field(record, field_map.depreciation).to_string(),
    })
}

/// Parses `category,budget` rows into budget targets. Categories may be given by label
/// (`Net Cash Flow`) or key (`netCashFlow`).
pub fn parse_budget_csv<R: std::io::Read>(reader: R) -> Result<BudgetTargets, ParserError> {
    let mut reader = reader_builder().from_reader(reader);
    let mut header_to_index = header_index(&mut reader)?;
    let category_index = header_to_index
        .remove("category")
        .ok_or(MISSING_CATEGORY_HEADER)?;
    let budget_index = header_to_index
        .remove("budget")
        .ok_or(MISSING_BUDGET_HEADER)?;

    let mut targets = BudgetTargets::default();
    for record in reader.into_records() {
        let record = record?;
        let category = field(&record, Some(category_index));
        let category: BudgetCategory = category
            .parse()
            .map_err(|_| ParserError::InvalidBudgetCategory(category.to_string()))?;
        targets.set(category, field(&record, Some(budget_index)));
    }

    Ok(targets)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cur;

    const FIELD_MAP: FieldToIndexMap = FieldToIndexMap {
        account: Some(0),
        ty: 1,
        subtype: Some(2),
        amount: 3,
        depreciation: Some(4),
    };

    fn row(fields: Vec<&str>) -> Result<LedgerRow, ParserError> {
        parse_row(&StringRecord::from(fields), FIELD_MAP)
    }

    #[test]
    fn can_parse_non_current_asset() {
        assert_eq!(
            row(vec!["Equipment", "asset", "non-current", "100", "25"]).unwrap(),
            LedgerRow {
                account: "Equipment".to_string(),
                ty: AccountType::Asset,
                subtype: AccountSubtype::NonCurrent,
                amount: "100".to_string(),
                depreciation: "25".to_string(),
            }
        );
    }

    #[test]
    fn blank_subtype_defaults_to_first_option() {
        let parsed = row(vec!["Loan", "liability", "", "100", ""]).unwrap();
        assert_eq!(parsed.subtype, AccountSubtype::Current);
    }

    #[test]
    fn subtype_of_another_type_defaults_to_first_option() {
        let parsed = row(vec!["Sales", "revenue", "non-current", "100", ""]).unwrap();
        assert_eq!(parsed.subtype, AccountSubtype::Operating);
    }

    #[test]
    fn blank_type_uses_catalog_classification() {
        let parsed = row(vec!["bank loan", "", "", "100", ""]).unwrap();
        assert_eq!(parsed.ty, AccountType::Liability);
        assert_eq!(parsed.subtype, AccountSubtype::NonCurrent);
    }

    #[test]
    fn unknown_type_fails() {
        assert!(matches!(
            row(vec!["Mystery", "goodwill", "", "1", ""]),
            Err(ParserError::InvalidTypeField(ty)) if ty == "goodwill"
        ));
        assert!(matches!(
            row(vec!["Mystery", "", "", "1", ""]),
            Err(ParserError::InvalidTypeField(_))
        ));
    }

    #[test]
    fn short_records_read_as_blank() {
        let parsed = row(vec!["Cash", "asset"]).unwrap();
        assert_eq!(parsed.amount, "");
        assert_eq!(parsed.depreciation, "");
    }

    #[test]
    fn depreciation_dropped_when_not_applicable() {
        let draft = row(vec!["Cash", "asset", "current", "10", "3"])
            .unwrap()
            .into_draft();
        assert!(draft.depreciation.is_empty());
    }

    #[test]
    fn headers_in_any_order_and_case() {
        let csv = "Amount, Type ,account\n12.5,expense,Rent Expense\nabc,revenue,Gross Sales\n";
        let rows = parse_ledger_csv(csv.as_bytes())
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].account, "Rent Expense");
        assert_eq!(rows[0].subtype, AccountSubtype::Operating);
        assert_eq!(rows[1].amount, "abc");
    }

    #[test]
    fn missing_amount_header_fails() {
        assert!(matches!(
            parse_ledger_csv("account,type\nCash,asset\n".as_bytes()),
            Err(ParserError::MissingHeader(Header::Amount))
        ));
    }

    #[test]
    fn can_parse_budget() {
        let csv = "category,budget\nRevenue,1000\nnetCashFlow,250.5\nExpenses,\n";
        let targets = parse_budget_csv(csv.as_bytes()).unwrap();
        assert_eq!(targets.get(BudgetCategory::Revenue), cur!(1000));
        assert_eq!(targets.get(BudgetCategory::NetCashFlow), cur!(250.5));
        assert_eq!(targets.expense, "");
    }

    #[test]
    fn unknown_budget_category_fails() {
        assert!(matches!(
            parse_budget_csv("category,budget\nPayroll,10\n".as_bytes()),
            Err(ParserError::InvalidBudgetCategory(c)) if c == "Payroll"
        ));
    }
}
