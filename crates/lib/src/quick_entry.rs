use crate::{
    catalog::*, parse_amount, AccountSubtype, AccountType, Currency, EntryDraft, LedgerEntry,
    LedgerStore,
};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuickEntryError {
    #[error("Enter a non-zero amount, `{0}` is not one")]
    InvalidAmount(String),
    #[error("Unknown quick entry `{0}`")]
    UnknownTemplate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum TemplateId {
    #[strum(serialize = "Invoice Customer")]
    InvoiceCustomer,
    #[strum(serialize = "Cash Sale")]
    CashSale,
    #[strum(serialize = "Owner Investment")]
    OwnerInvestment,
    #[strum(serialize = "Take Bank Loan")]
    TakeBankLoan,
    #[strum(serialize = "Buy Equipment on Credit")]
    BuyEquipmentOnCredit,
    #[strum(serialize = "Purchase Inventory on Credit")]
    PurchaseInventoryOnCredit,
    #[strum(serialize = "Accrue Rent Expense")]
    AccrueRentExpense,
    #[strum(serialize = "Accrue Salaries")]
    AccrueSalaries,
    #[strum(serialize = "Receive Interest")]
    ReceiveInterest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateLine {
    pub account: &'static str,
    pub ty: AccountType,
    pub subtype: AccountSubtype,
}

const fn line(account: &'static str, ty: AccountType, subtype: AccountSubtype) -> TemplateLine {
    TemplateLine { account, ty, subtype }
}

use AccountSubtype::*;
use AccountType::*;

const INVOICE_CUSTOMER: &[TemplateLine] = &[
    line(ACCOUNTS_RECEIVABLE, Asset, Current),
    line(SALES_REVENUE, Revenue, Operating),
];

const CASH_SALE: &[TemplateLine] = &[
    line(CASH, Asset, Current),
    line(SALES_REVENUE, Revenue, Operating),
];

const OWNER_INVESTMENT: &[TemplateLine] = &[
    line(CASH, Asset, Current),
    line(OWNER_CAPITAL, Capital, Equity),
];

const TAKE_BANK_LOAN: &[TemplateLine] = &[
    line(CASH, Asset, Current),
    line(BANK_LOAN, Liability, NonCurrent),
];

const BUY_EQUIPMENT_ON_CREDIT: &[TemplateLine] = &[
    line(EQUIPMENT, Asset, NonCurrent),
    line(ACCOUNTS_PAYABLE, Liability, Current),
];

const PURCHASE_INVENTORY_ON_CREDIT: &[TemplateLine] = &[
    line(INVENTORY, Asset, Current),
    line(ACCOUNTS_PAYABLE, Liability, Current),
];

const ACCRUE_RENT_EXPENSE: &[TemplateLine] = &[
    line(RENT_EXPENSE, Expense, Operating),
    line(ACCRUED_EXPENSES, Liability, Current),
];

const ACCRUE_SALARIES: &[TemplateLine] = &[
    line(SALARIES_AND_WAGES, Expense, Operating),
    line(ACCRUED_EXPENSES, Liability, Current),
];

const RECEIVE_INTEREST: &[TemplateLine] = &[
    line(CASH, Asset, Current),
    line(INTEREST_RECEIVED, Revenue, Other),
];

impl TemplateId {
    /// Lines posted by the template, debit side first. Every line carries the same amount so
    /// each template leaves a balanced ledger balanced.
    pub fn lines(self) -> &'static [TemplateLine] {
        match self {
            TemplateId::InvoiceCustomer => INVOICE_CUSTOMER,
            TemplateId::CashSale => CASH_SALE,
            TemplateId::OwnerInvestment => OWNER_INVESTMENT,
            TemplateId::TakeBankLoan => TAKE_BANK_LOAN,
            TemplateId::BuyEquipmentOnCredit => BUY_EQUIPMENT_ON_CREDIT,
            TemplateId::PurchaseInventoryOnCredit => PURCHASE_INVENTORY_ON_CREDIT,
            TemplateId::AccrueRentExpense => ACCRUE_RENT_EXPENSE,
            TemplateId::AccrueSalaries => ACCRUE_SALARIES,
            TemplateId::ReceiveInterest => RECEIVE_INTEREST,
        }
    }

    pub fn drafts(self, amount: &str) -> impl Iterator<Item = EntryDraft> + '_ {
        self.lines()
            .iter()
            .map(move |line| EntryDraft::new(line.account, line.ty, line.subtype, amount))
    }
}

/// Posts the template named `template_id` with `amount` on every line.
///
/// Returns the appended entries. On error the ledger is left untouched.
pub fn apply_template(
    template_id: &str,
    amount: &str,
    ledger: &mut LedgerStore,
) -> Result<Vec<LedgerEntry>, QuickEntryError> {
    let template: TemplateId = template_id
        .trim()
        .parse()
        .map_err(|_| QuickEntryError::UnknownTemplate(template_id.to_string()))?;
    if parse_amount(amount) == Currency::ZERO {
        return Err(QuickEntryError::InvalidAmount(amount.to_string()));
    }

    let ids = ledger.bulk_append(template.drafts(amount));
    tracing::debug!(%template, ?ids, "posted quick entry");

    Ok(ids
        .into_iter()
        .filter_map(|id| ledger.get(id).cloned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cur, Statement};
    use strum::IntoEnumIterator;

    #[test]
    fn invoice_customer_posts_two_entries() {
        let mut ledger = LedgerStore::default();
        ledger.add_row();
        let before = ledger.get(1).cloned();

        let posted = apply_template("Invoice Customer", "500.00", &mut ledger).unwrap();

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(1).cloned(), before);
        let summary = posted
            .iter()
            .map(|e| (e.account.as_str(), e.ty, e.subtype, e.amount.text()))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("Accounts Receivable", Asset, Current, "500.00"),
                ("Sales Revenue", Revenue, Operating, "500.00"),
            ]
        );
        assert_eq!(posted[0].amount.value(), cur!(500));
        assert_eq!(posted.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn template_names_ignore_case() {
        let mut ledger = LedgerStore::default();
        assert!(apply_template(" cash sale ", "10", &mut ledger).is_ok());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn zero_or_garbage_amount_is_rejected() {
        let mut ledger = LedgerStore::default();
        for amount in ["", "0", "0.00", "abc"] {
            assert_eq!(
                apply_template("Invoice Customer", amount, &mut ledger),
                Err(QuickEntryError::InvalidAmount(amount.to_string()))
            );
        }
        assert!(ledger.is_empty());
        assert_eq!(ledger.revision(), 0);
    }

    #[test]
    fn unknown_template_is_rejected() {
        let mut ledger = LedgerStore::default();
        assert_eq!(
            apply_template("Pay Dividends", "10", &mut ledger),
            Err(QuickEntryError::UnknownTemplate("Pay Dividends".to_string()))
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn every_template_keeps_the_ledger_balanced() {
        for template in TemplateId::iter() {
            let mut ledger = LedgerStore::default();
            apply_template(&template.to_string(), "123.45", &mut ledger).unwrap();
            let statement = Statement::derive(ledger.iter());
            assert_eq!(
                statement.summary.balance_delta,
                Currency::ZERO,
                "{template} is unbalanced"
            );
        }
    }

    #[test]
    fn template_lines_are_valid_classifications() {
        for template in TemplateId::iter() {
            let lines = template.lines();
            assert_eq!(lines.len(), 2, "{template}");
            for line in lines {
                assert!(crate::is_valid_subtype(line.ty, line.subtype));
            }
        }
    }
}
