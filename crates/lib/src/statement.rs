use crate::{
    catalog::*, normalize_account_name, AccountSubtype, AccountType, Currency, LedgerEntry,
    BALANCE_TOLERANCE,
};
use std::collections::BTreeMap;

fn add(total: &mut Currency, amount: Currency) {
    *total = total.saturating_add(amount);
}

fn sum<I: IntoIterator<Item = Currency>>(amounts: I) -> Currency {
    amounts
        .into_iter()
        .fold(Currency::ZERO, Currency::saturating_add)
}

/// Totals bucketed by type and subtype, independent of account names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StructuralTotals {
    pub revenue: Currency,
    pub expense: Currency,
    pub assets_current: Currency,
    pub assets_non_current_gross: Currency,
    pub non_current_accumulated_depreciation: Currency,
    /// Net of depreciation, every entry contributing at least zero.
    pub assets_non_current: Currency,
    pub liabilities_current: Currency,
    pub liabilities_non_current: Currency,
    pub capital: Currency,
    pub drawings: Currency,
}

impl StructuralTotals {
    fn post(&mut self, entry: &LedgerEntry) {
        let amount = entry.amount.value();
        if amount == Currency::ZERO {
            return;
        }

        let bucket = match (entry.ty, entry.subtype) {
            (AccountType::Revenue, _) => &mut self.revenue,
            (AccountType::Expense, _) => &mut self.expense,
            (AccountType::Asset, AccountSubtype::NonCurrent) => {
                let depreciation = entry.depreciation_applied();
                add(&mut self.assets_non_current_gross, amount);
                add(&mut self.non_current_accumulated_depreciation, depreciation);
                add(
                    &mut self.assets_non_current,
                    amount.saturating_sub(depreciation).max(Currency::ZERO),
                );
                return;
            }
            (AccountType::Asset, _) => &mut self.assets_current,
            (AccountType::Liability, AccountSubtype::NonCurrent) => &mut self.liabilities_non_current,
            (AccountType::Liability, _) => &mut self.liabilities_current,
            (AccountType::Capital, _) => &mut self.capital,
            (AccountType::Drawings, _) => &mut self.drawings,
        };
        add(bucket, amount);
    }
}

/// Totals per normalized account name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccountTotals(BTreeMap<String, Currency>);

impl AccountTotals {
    fn post(&mut self, entry: &LedgerEntry) {
        let name = normalize_account_name(&entry.account);
        if name.is_empty() {
            return;
        }
        add(self.0.entry(name).or_default(), entry.amount.value());
    }

    /// Sum of the totals posted under any of `names`, compared case-insensitively.
    pub fn amount_by_account(&self, names: &[&str]) -> Currency {
        let mut normalized = names
            .iter()
            .map(|name| normalize_account_name(name))
            .collect::<Vec<_>>();
        normalized.sort_unstable();
        normalized.dedup();
        sum(normalized
            .iter()
            .filter_map(|name| self.0.get(name).copied()))
    }

    /// Whether any of `names` was posted to, whatever the amount.
    pub fn contains_any(&self, names: &[&str]) -> bool {
        names
            .iter()
            .any(|name| self.0.contains_key(&normalize_account_name(name)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Currency)> {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }
}

/// Figures derived from the structural totals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub profit: Currency,
    pub equity: Currency,
    pub total_assets: Currency,
    pub total_liabilities: Currency,
    pub liabilities_and_equity: Currency,
    /// `total_assets - liabilities_and_equity`, reported but never corrected.
    pub balance_delta: Currency,
    pub net_operating_cash_flow: Currency,
    pub net_cash_flow: Currency,
}

impl Summary {
    fn new(t: &StructuralTotals) -> Self {
        let profit = t.revenue.saturating_sub(t.expense);
        let equity = t.capital.saturating_add(profit).saturating_sub(t.drawings);
        let total_assets = t.assets_current.saturating_add(t.assets_non_current);
        let total_liabilities = t.liabilities_current.saturating_add(t.liabilities_non_current);
        let liabilities_and_equity = total_liabilities.saturating_add(equity);
        let net_operating_cash_flow = t.revenue.saturating_sub(t.expense);
        let net_cash_flow = net_operating_cash_flow
            .saturating_sub(t.assets_non_current)
            .saturating_add(t.capital)
            .saturating_sub(t.drawings);

        Self {
            profit,
            equity,
            total_assets,
            total_liabilities,
            liabilities_and_equity,
            balance_delta: total_assets.saturating_sub(liabilities_and_equity),
            net_operating_cash_flow,
            net_cash_flow,
        }
    }
}

/// Profit and loss built from named accounts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DetailedProfitAndLoss {
    pub gross_sales: Currency,
    pub goods_return: Currency,
    pub discounts: Currency,
    pub bad_debts: Currency,
    pub cogs: Currency,
    pub income_from_revenue: Currency,
    pub interest_received: Currency,
    pub rental_income: Currency,
    pub misc_income: Currency,
    pub income_from_other_sources: Currency,
    pub gross_income: Currency,
    pub total_expenses_detailed: Currency,
    pub profit_before_tax: Currency,
    pub income_tax_expense: Currency,
    pub net_profit_after_tax: Currency,
}

/// Accounts feeding `gross_income`.
pub const GROSS_INCOME_ACCOUNTS: [&str; 9] = [
    GROSS_SALES,
    SALES_REVENUE,
    GOODS_RETURN,
    DISCOUNTS,
    BAD_DEBTS,
    COST_OF_GOODS_SOLD,
    INTEREST_RECEIVED,
    RENTAL_INCOME,
    MISC_INCOME,
];

/// Operating expense lines summed into `total_expenses_detailed`.
pub const OPERATING_EXPENSE_ACCOUNTS: [&str; 9] = [
    SALARIES_AND_WAGES,
    RENT_EXPENSE,
    UTILITIES_EXPENSE,
    DEPRECIATION_EXPENSE,
    ADVERTISING_EXPENSE,
    INSURANCE_EXPENSE,
    REPAIRS_AND_MAINTENANCE,
    OFFICE_SUPPLIES_EXPENSE,
    MISC_EXPENSE,
];

impl DetailedProfitAndLoss {
    fn new(accounts: &AccountTotals) -> Self {
        let gross_sales = accounts.amount_by_account(&[GROSS_SALES, SALES_REVENUE]);
        let goods_return = accounts.amount_by_account(&[GOODS_RETURN]);
        let discounts = accounts.amount_by_account(&[DISCOUNTS]);
        let bad_debts = accounts.amount_by_account(&[BAD_DEBTS]);
        let cogs = accounts.amount_by_account(&[COST_OF_GOODS_SOLD]);
        let income_from_revenue = gross_sales
            .saturating_sub(goods_return)
            .saturating_sub(discounts)
            .saturating_sub(bad_debts)
            .saturating_sub(cogs);

        let interest_received = accounts.amount_by_account(&[INTEREST_RECEIVED]);
        let rental_income = accounts.amount_by_account(&[RENTAL_INCOME]);
        let misc_income = accounts.amount_by_account(&[MISC_INCOME]);
        let income_from_other_sources = sum([interest_received, rental_income, misc_income]);
        let gross_income = income_from_revenue.saturating_add(income_from_other_sources);

        let total_expenses_detailed = sum(OPERATING_EXPENSE_ACCOUNTS
            .iter()
            .map(|name| accounts.amount_by_account(&[name])));
        let profit_before_tax = gross_income.saturating_sub(total_expenses_detailed);
        let income_tax_expense = accounts.amount_by_account(&[INCOME_TAX_EXPENSE]);

        Self {
            gross_sales,
            goods_return,
            discounts,
            bad_debts,
            cogs,
            income_from_revenue,
            interest_received,
            rental_income,
            misc_income,
            income_from_other_sources,
            gross_income,
            total_expenses_detailed,
            profit_before_tax,
            income_tax_expense,
            net_profit_after_tax: profit_before_tax.saturating_sub(income_tax_expense),
        }
    }
}

/// Cash flow from operations by the indirect method.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndirectCashFlow {
    pub depreciation: Currency,
    pub interest_on_borrowings: Currency,
    pub loss_on_sale: Currency,
    pub interest_income: Currency,
    pub dividend_income: Currency,
    pub profit_on_sale: Currency,
    pub operating_profit_before_working_capital: Currency,
    pub decrease_current_assets: Currency,
    pub increase_current_liabilities: Currency,
    pub increase_current_assets: Currency,
    pub decrease_current_liabilities: Currency,
    pub working_capital_adjustments: Currency,
    pub cash_generated_from_operations: Currency,
    pub income_taxes_paid: Currency,
    pub net_cash_from_operations: Currency,
}

impl IndirectCashFlow {
    fn new(accounts: &AccountTotals, profit_before_tax: Currency) -> Self {
        // Named "Depreciation Expense" rows only, depreciation netted on non-current assets is
        // not linked here.
        let depreciation = accounts.amount_by_account(&[DEPRECIATION_EXPENSE]);
        let interest_on_borrowings = accounts.amount_by_account(&[INTEREST_ON_BORROWINGS]);
        let loss_on_sale = accounts.amount_by_account(&[LOSS_ON_SALE_OF_ASSETS]);
        let interest_income = accounts.amount_by_account(&[INTEREST_INCOME]);
        let dividend_income = accounts.amount_by_account(&[DIVIDEND_INCOME]);
        let profit_on_sale = accounts.amount_by_account(&[PROFIT_ON_SALE_OF_ASSETS]);
        let operating_profit_before_working_capital = sum([
            profit_before_tax,
            depreciation,
            interest_on_borrowings,
            loss_on_sale,
        ])
        .saturating_sub(interest_income)
        .saturating_sub(dividend_income)
        .saturating_sub(profit_on_sale);

        let decrease_current_assets = accounts.amount_by_account(&[DECREASE_IN_CURRENT_ASSETS]);
        let increase_current_liabilities =
            accounts.amount_by_account(&[INCREASE_IN_CURRENT_LIABILITIES]);
        let increase_current_assets = accounts.amount_by_account(&[INCREASE_IN_CURRENT_ASSETS]);
        let decrease_current_liabilities =
            accounts.amount_by_account(&[DECREASE_IN_CURRENT_LIABILITIES]);
        let working_capital_adjustments = decrease_current_assets
            .saturating_add(increase_current_liabilities)
            .saturating_sub(increase_current_assets)
            .saturating_sub(decrease_current_liabilities);

        let cash_generated_from_operations =
            operating_profit_before_working_capital.saturating_add(working_capital_adjustments);
        let income_taxes_paid = accounts.amount_by_account(&[INCOME_TAXES_PAID]);

        Self {
            depreciation,
            interest_on_borrowings,
            loss_on_sale,
            interest_income,
            dividend_income,
            profit_on_sale,
            operating_profit_before_working_capital,
            decrease_current_assets,
            increase_current_liabilities,
            increase_current_assets,
            decrease_current_liabilities,
            working_capital_adjustments,
            cash_generated_from_operations,
            income_taxes_paid,
            net_cash_from_operations: cash_generated_from_operations
                .saturating_sub(income_taxes_paid),
        }
    }
}

/// Every figure derived from one ledger snapshot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statement {
    pub totals: StructuralTotals,
    pub accounts: AccountTotals,
    pub summary: Summary,
    pub profit_and_loss: DetailedProfitAndLoss,
    pub cash_flow: IndirectCashFlow,
}

impl Statement {
    /// Derives the full statement from the ledger entries, in ledger order.
    ///
    /// Total and deterministic: the same entries always give the same statement.
    pub fn derive<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a LedgerEntry>,
    {
        let mut totals = StructuralTotals::default();
        let mut accounts = AccountTotals::default();
        for entry in entries {
            totals.post(entry);
            accounts.post(entry);
        }

        let summary = Summary::new(&totals);
        let profit_and_loss = DetailedProfitAndLoss::new(&accounts);
        let cash_flow = IndirectCashFlow::new(&accounts, profit_and_loss.profit_before_tax);

        Self {
            totals,
            accounts,
            summary,
            profit_and_loss,
            cash_flow,
        }
    }

    pub fn amount_by_account(&self, names: &[&str]) -> Currency {
        self.accounts.amount_by_account(names)
    }

    pub fn is_balanced(&self) -> bool {
        let delta = self.summary.balance_delta;
        -BALANCE_TOLERANCE <= delta && delta <= BALANCE_TOLERANCE
    }

    /// Every scalar of the statement as `(name, amount)` in presentation order.
    pub fn lines(&self) -> Vec<(&'static str, Currency)> {
        let t = &self.totals;
        let s = &self.summary;
        let p = &self.profit_and_loss;
        let c = &self.cash_flow;
        vec![
            ("revenue", t.revenue),
            ("expense", t.expense),
            ("profit", s.profit),
            ("assetsCurrent", t.assets_current),
            ("assetsNonCurrentGross", t.assets_non_current_gross),
            ("nonCurrentAccumulatedDepreciation", t.non_current_accumulated_depreciation),
            ("assetsNonCurrent", t.assets_non_current),
            ("totalAssets", s.total_assets),
            ("liabilitiesCurrent", t.liabilities_current),
            ("liabilitiesNonCurrent", t.liabilities_non_current),
            ("totalLiabilities", s.total_liabilities),
            ("capital", t.capital),
            ("drawings", t.drawings),
            ("equity", s.equity),
            ("liabilitiesAndEquity", s.liabilities_and_equity),
            ("balanceDelta", s.balance_delta),
            ("netOperatingCashFlow", s.net_operating_cash_flow),
            ("netCashFlow", s.net_cash_flow),
            ("grossSales", p.gross_sales),
            ("goodsReturn", p.goods_return),
            ("discounts", p.discounts),
            ("badDebts", p.bad_debts),
            ("cogs", p.cogs),
            ("incomeFromRevenue", p.income_from_revenue),
            ("interestReceived", p.interest_received),
            ("rentalIncome", p.rental_income),
            ("miscIncome", p.misc_income),
            ("incomeFromOtherSources", p.income_from_other_sources),
            ("grossIncome", p.gross_income),
            ("totalExpensesDetailed", p.total_expenses_detailed),
            ("profitBeforeTax", p.profit_before_tax),
            ("incomeTaxExpense", p.income_tax_expense),
            ("netProfitAfterTax", p.net_profit_after_tax),
            ("depreciation", c.depreciation),
            ("interestOnBorrowings", c.interest_on_borrowings),
            ("lossOnSale", c.loss_on_sale),
            ("interestIncome", c.interest_income),
            ("dividendIncome", c.dividend_income),
            ("profitOnSale", c.profit_on_sale),
            ("operatingProfitBeforeWorkingCapital", c.operating_profit_before_working_capital),
            ("decreaseCurrentAssets", c.decrease_current_assets),
            ("increaseCurrentLiabilities", c.increase_current_liabilities),
            ("increaseCurrentAssets", c.increase_current_assets),
            ("decreaseCurrentLiabilities", c.decrease_current_liabilities),
            ("workingCapitalAdjustments", c.working_capital_adjustments),
            ("cashGeneratedFromOperations", c.cash_generated_from_operations),
            ("incomeTaxesPaid", c.income_taxes_paid),
            ("netCashFromOperations", c.net_cash_from_operations),
        ]
    }
}
