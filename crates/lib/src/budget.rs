use crate::{
    parse_amount, Currency, Statement, GROSS_INCOME_ACCOUNTS, OPERATING_EXPENSE_ACCOUNTS,
};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum BudgetCategory {
    Revenue,
    #[strum(to_string = "Expenses", serialize = "expense")]
    Expenses,
    #[strum(to_string = "Assets", serialize = "totalAssets")]
    Assets,
    #[strum(to_string = "Liabilities", serialize = "totalLiabilities")]
    Liabilities,
    Equity,
    #[strum(to_string = "Net Cash Flow", serialize = "netCashFlow")]
    NetCashFlow,
}

/// Budget figures as typed by the user, one per category.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BudgetTargets {
    pub revenue: String,
    pub expense: String,
    pub total_assets: String,
    pub total_liabilities: String,
    pub equity: String,
    pub net_cash_flow: String,
}

impl BudgetTargets {
    fn text(&self, category: BudgetCategory) -> &str {
        match category {
            BudgetCategory::Revenue => &self.revenue,
            BudgetCategory::Expenses => &self.expense,
            BudgetCategory::Assets => &self.total_assets,
            BudgetCategory::Liabilities => &self.total_liabilities,
            BudgetCategory::Equity => &self.equity,
            BudgetCategory::NetCashFlow => &self.net_cash_flow,
        }
    }

    pub fn get(&self, category: BudgetCategory) -> Currency {
        parse_amount(self.text(category))
    }

    pub fn set(&mut self, category: BudgetCategory, value: impl Into<String>) {
        let slot = match category {
            BudgetCategory::Revenue => &mut self.revenue,
            BudgetCategory::Expenses => &mut self.expense,
            BudgetCategory::Assets => &mut self.total_assets,
            BudgetCategory::Liabilities => &mut self.total_liabilities,
            BudgetCategory::Equity => &mut self.equity,
            BudgetCategory::NetCashFlow => &mut self.net_cash_flow,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetComparison {
    pub category: BudgetCategory,
    pub actual: Currency,
    pub budget: Currency,
}

impl BudgetComparison {
    pub fn label(&self) -> String {
        self.category.to_string()
    }

    pub fn variance(&self) -> Currency {
        self.actual.saturating_sub(self.budget)
    }
}

/// The detailed figure when the ledger posts to any of its `accounts`, otherwise the structural
/// one.
fn prefer_detailed(
    statement: &Statement,
    accounts: &[&str],
    detailed: Currency,
    structural: Currency,
) -> Currency {
    if statement.accounts.contains_any(accounts) {
        detailed
    } else {
        structural
    }
}

impl BudgetCategory {
    pub fn actual(self, statement: &Statement) -> Currency {
        match self {
            BudgetCategory::Revenue => prefer_detailed(
                statement,
                &GROSS_INCOME_ACCOUNTS,
                statement.profit_and_loss.gross_income,
                statement.totals.revenue,
            ),
            BudgetCategory::Expenses => prefer_detailed(
                statement,
                &OPERATING_EXPENSE_ACCOUNTS,
                statement.profit_and_loss.total_expenses_detailed,
                statement.totals.expense,
            ),
            BudgetCategory::Assets => statement.summary.total_assets,
            BudgetCategory::Liabilities => statement.summary.total_liabilities,
            BudgetCategory::Equity => statement.summary.equity,
            BudgetCategory::NetCashFlow => statement.summary.net_cash_flow,
        }
    }
}

/// Pairs the statement with the budget targets, one row per category in display order.
pub fn compare(statement: &Statement, targets: &BudgetTargets) -> Vec<BudgetComparison> {
    use strum::IntoEnumIterator;

    BudgetCategory::iter()
        .map(|category| BudgetComparison {
            category,
            actual: category.actual(statement),
            budget: targets.get(category),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cur, AccountSubtype, AccountType, EntryDraft, LedgerStore};

    fn statement(drafts: Vec<EntryDraft>) -> Statement {
        let mut ledger = LedgerStore::default();
        ledger.bulk_append(drafts);
        Statement::derive(ledger.iter())
    }

    #[test]
    fn compares_all_categories_in_order() {
        let mut targets = BudgetTargets::default();
        targets.set(BudgetCategory::Revenue, "800");
        targets.set(BudgetCategory::NetCashFlow, "lots");

        let rows = compare(&Statement::default(), &targets);
        assert_eq!(
            rows.iter().map(BudgetComparison::label).collect::<Vec<_>>(),
            vec!["Revenue", "Expenses", "Assets", "Liabilities", "Equity", "Net Cash Flow"]
        );
        assert_eq!(rows[0].budget, cur!(800));
        assert_eq!(rows[0].variance(), cur!(-800));
        assert_eq!(rows[5].budget, Currency::ZERO);
    }

    #[test]
    fn prefers_detailed_expenses() {
        let statement = statement(vec![
            EntryDraft::new("Rent Expense", AccountType::Expense, AccountSubtype::Operating, "100"),
            EntryDraft::new("Coffee", AccountType::Expense, AccountSubtype::Operating, "5"),
        ]);
        assert_eq!(BudgetCategory::Expenses.actual(&statement), cur!(100));
    }

    #[test]
    fn falls_back_to_structural_totals() {
        let statement = statement(vec![
            EntryDraft::new("Consulting", AccountType::Revenue, AccountSubtype::Operating, "70"),
            EntryDraft::new("Coffee", AccountType::Expense, AccountSubtype::Operating, "5"),
        ]);
        assert_eq!(BudgetCategory::Revenue.actual(&statement), cur!(70));
        assert_eq!(BudgetCategory::Expenses.actual(&statement), cur!(5));
    }

    #[test]
    fn detailed_figure_used_even_when_it_nets_to_zero() {
        let statement = statement(vec![
            EntryDraft::new("Gross Sales", AccountType::Revenue, AccountSubtype::Operating, "100"),
            EntryDraft::new("Goods Return", AccountType::Revenue, AccountSubtype::Operating, "100"),
        ]);
        assert_eq!(statement.totals.revenue, cur!(200));
        assert_eq!(BudgetCategory::Revenue.actual(&statement), Currency::ZERO);
    }

    #[test]
    fn categories_parse_from_labels_and_keys() {
        assert_eq!("Net Cash Flow".parse::<BudgetCategory>(), Ok(BudgetCategory::NetCashFlow));
        assert_eq!("totalassets".parse::<BudgetCategory>(), Ok(BudgetCategory::Assets));
        assert_eq!("expense".parse::<BudgetCategory>(), Ok(BudgetCategory::Expenses));
    }
}
