use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AccountType {
    Revenue,
    Expense,
    Asset,
    Liability,
    Capital,
    Drawings,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AccountSubtype {
    Current,
    NonCurrent,
    Operating,
    Other,
    Equity,
}

const BALANCE_SHEET_SUBTYPES: &[AccountSubtype] = &[AccountSubtype::Current, AccountSubtype::NonCurrent];
const INCOME_SUBTYPES: &[AccountSubtype] = &[AccountSubtype::Operating, AccountSubtype::Other];
const EQUITY_SUBTYPES: &[AccountSubtype] = &[AccountSubtype::Equity];

/// Valid subtypes for `ty`, the first one being the default.
pub fn subtype_options(ty: AccountType) -> &'static [AccountSubtype] {
    match ty {
        AccountType::Asset | AccountType::Liability => BALANCE_SHEET_SUBTYPES,
        AccountType::Revenue | AccountType::Expense => INCOME_SUBTYPES,
        AccountType::Capital | AccountType::Drawings => EQUITY_SUBTYPES,
    }
}

/// Same as [`subtype_options`] for a type still in text form.
///
/// Text that isn't a known type gets the equity options.
pub fn subtype_options_for(ty: &str) -> &'static [AccountSubtype] {
    ty.trim()
        .parse()
        .map(subtype_options)
        .unwrap_or(EQUITY_SUBTYPES)
}

pub fn default_subtype(ty: AccountType) -> AccountSubtype {
    subtype_options(ty)[0]
}

pub fn is_valid_subtype(ty: AccountType, subtype: AccountSubtype) -> bool {
    subtype_options(ty).contains(&subtype)
}

/// Only non-current assets carry accumulated depreciation.
pub fn allows_depreciation(ty: AccountType, subtype: AccountSubtype) -> bool {
    ty == AccountType::Asset && subtype == AccountSubtype::NonCurrent
}
