use crate::{AccountSubtype, AccountType};

pub const CASH: &str = "Cash";
pub const ACCOUNTS_RECEIVABLE: &str = "Accounts Receivable";
pub const INVENTORY: &str = "Inventory";
pub const EQUIPMENT: &str = "Equipment";
pub const ACCOUNTS_PAYABLE: &str = "Accounts Payable";
pub const ACCRUED_EXPENSES: &str = "Accrued Expenses";
pub const BANK_LOAN: &str = "Bank Loan";
pub const OWNER_CAPITAL: &str = "Owner Capital";
pub const OWNER_DRAWINGS: &str = "Owner Drawings";

pub const SALES_REVENUE: &str = "Sales Revenue";
pub const GROSS_SALES: &str = "Gross Sales";
pub const GOODS_RETURN: &str = "Goods Return";
pub const DISCOUNTS: &str = "Discounts";
pub const BAD_DEBTS: &str = "Bad Debts";
pub const COST_OF_GOODS_SOLD: &str = "Cost of Goods Sold";
pub const INTEREST_RECEIVED: &str = "Interest Received";
pub const RENTAL_INCOME: &str = "Rental Income";
pub const MISC_INCOME: &str = "Miscellaneous Income";

pub const SALARIES_AND_WAGES: &str = "Salaries and Wages";
pub const RENT_EXPENSE: &str = "Rent Expense";
pub const UTILITIES_EXPENSE: &str = "Utilities Expense";
pub const DEPRECIATION_EXPENSE: &str = "Depreciation Expense";
pub const ADVERTISING_EXPENSE: &str = "Advertising Expense";
pub const INSURANCE_EXPENSE: &str = "Insurance Expense";
pub const REPAIRS_AND_MAINTENANCE: &str = "Repairs and Maintenance";
pub const OFFICE_SUPPLIES_EXPENSE: &str = "Office Supplies Expense";
pub const MISC_EXPENSE: &str = "Miscellaneous Expense";
pub const INCOME_TAX_EXPENSE: &str = "Income Tax Expense";

pub const INTEREST_ON_BORROWINGS: &str = "Interest on Borrowings";
pub const LOSS_ON_SALE_OF_ASSETS: &str = "Loss on Sale of Assets";
pub const INTEREST_INCOME: &str = "Interest Income";
pub const DIVIDEND_INCOME: &str = "Dividend Income";
pub const PROFIT_ON_SALE_OF_ASSETS: &str = "Profit on Sale of Assets";
pub const DECREASE_IN_CURRENT_ASSETS: &str = "Decrease in Current Assets";
pub const INCREASE_IN_CURRENT_LIABILITIES: &str = "Increase in Current Liabilities";
pub const INCREASE_IN_CURRENT_ASSETS: &str = "Increase in Current Assets";
pub const DECREASE_IN_CURRENT_LIABILITIES: &str = "Decrease in Current Liabilities";
pub const INCOME_TAXES_PAID: &str = "Income Taxes Paid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogAccount {
    pub name: &'static str,
    pub ty: AccountType,
    pub subtype: AccountSubtype,
}

const fn account(name: &'static str, ty: AccountType, subtype: AccountSubtype) -> CatalogAccount {
    CatalogAccount { name, ty, subtype }
}

use AccountSubtype::*;
use AccountType::*;

pub static ACCOUNT_CATALOG: &[CatalogAccount] = &[
    account(CASH, Asset, Current),
    account(ACCOUNTS_RECEIVABLE, Asset, Current),
    account(INVENTORY, Asset, Current),
    account(EQUIPMENT, Asset, NonCurrent),
    account(ACCOUNTS_PAYABLE, Liability, Current),
    account(ACCRUED_EXPENSES, Liability, Current),
    account(BANK_LOAN, Liability, NonCurrent),
    account(OWNER_CAPITAL, Capital, Equity),
    account(OWNER_DRAWINGS, Drawings, Equity),
    account(SALES_REVENUE, Revenue, Operating),
    account(GROSS_SALES, Revenue, Operating),
    account(GOODS_RETURN, Revenue, Operating),
    account(DISCOUNTS, Revenue, Operating),
    account(BAD_DEBTS, Expense, Operating),
    account(COST_OF_GOODS_SOLD, Expense, Operating),
    account(INTEREST_RECEIVED, Revenue, Other),
    account(RENTAL_INCOME, Revenue, Other),
    account(MISC_INCOME, Revenue, Other),
    account(SALARIES_AND_WAGES, Expense, Operating),
    account(RENT_EXPENSE, Expense, Operating),
    account(UTILITIES_EXPENSE, Expense, Operating),
    account(DEPRECIATION_EXPENSE, Expense, Operating),
    account(ADVERTISING_EXPENSE, Expense, Operating),
    account(INSURANCE_EXPENSE, Expense, Operating),
    account(REPAIRS_AND_MAINTENANCE, Expense, Operating),
    account(OFFICE_SUPPLIES_EXPENSE, Expense, Operating),
    account(MISC_EXPENSE, Expense, Operating),
    account(INCOME_TAX_EXPENSE, Expense, Other),
    account(INTEREST_ON_BORROWINGS, Expense, Other),
    account(LOSS_ON_SALE_OF_ASSETS, Expense, Other),
    account(INTEREST_INCOME, Revenue, Other),
    account(DIVIDEND_INCOME, Revenue, Other),
    account(PROFIT_ON_SALE_OF_ASSETS, Revenue, Other),
    account(DECREASE_IN_CURRENT_ASSETS, Asset, Current),
    account(INCREASE_IN_CURRENT_LIABILITIES, Liability, Current),
    account(INCREASE_IN_CURRENT_ASSETS, Asset, Current),
    account(DECREASE_IN_CURRENT_LIABILITIES, Liability, Current),
    account(INCOME_TAXES_PAID, Expense, Other),
];

/// Normalized form used whenever account names are compared: surrounding whitespace trimmed,
/// inner runs of whitespace collapsed and lower cased.
pub fn normalize_account_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.extend(word.chars().flat_map(char::to_lowercase));
    }
    normalized
}

pub fn lookup(name: &str) -> Option<&'static CatalogAccount> {
    let name = normalize_account_name(name);
    if name.is_empty() {
        return None;
    }
    ACCOUNT_CATALOG
        .iter()
        .find(|account| normalize_account_name(account.name) == name)
}

/// Catalog names starting with `prefix`, in catalog order.
pub fn suggest(prefix: &str) -> impl Iterator<Item = &'static str> {
    let prefix = normalize_account_name(prefix);
    ACCOUNT_CATALOG
        .iter()
        .filter(move |account| normalize_account_name(account.name).starts_with(&prefix))
        .map(|account| account.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_spacing() {
        assert_eq!(normalize_account_name("  Gross   SALES "), "gross sales");
        assert_eq!(normalize_account_name(""), "");
        assert_eq!(normalize_account_name(" \t "), "");
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(
            lookup("accounts receivable"),
            Some(&CatalogAccount {
                name: ACCOUNTS_RECEIVABLE,
                ty: Asset,
                subtype: Current
            })
        );
        assert_eq!(lookup("Petty cash drawer"), None);
        assert_eq!(lookup("  "), None);
    }

    #[test]
    fn suggests_by_prefix() {
        assert_eq!(
            suggest("dec").collect::<Vec<_>>(),
            vec![DECREASE_IN_CURRENT_ASSETS, DECREASE_IN_CURRENT_LIABILITIES]
        );
        assert_eq!(suggest("").count(), ACCOUNT_CATALOG.len());
    }

    #[test]
    fn catalog_classifications_are_valid() {
        for account in ACCOUNT_CATALOG {
            assert!(
                crate::is_valid_subtype(account.ty, account.subtype),
                "{} has an invalid subtype",
                account.name
            );
        }
    }
}
