use crate::{
    apply_template, compare, BudgetCategory, BudgetComparison, BudgetTargets, EntryId, FieldEdit,
    LedgerEntry, LedgerStore, QuickEntryError, Statement,
};

/// One user's ledger and budget targets, with the statement memoized per ledger revision.
#[derive(Debug, Default, Clone)]
pub struct Session {
    ledger: LedgerStore,
    budget: BudgetTargets,
    cached: Option<(u64, Statement)>,
}

impl Session {
    pub fn new(ledger: LedgerStore, budget: BudgetTargets) -> Self {
        Self {
            ledger,
            budget,
            cached: None,
        }
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn budget(&self) -> &BudgetTargets {
        &self.budget
    }

    pub fn add_row(&mut self) -> EntryId {
        self.ledger.add_row()
    }

    pub fn update_field(&mut self, id: EntryId, edit: FieldEdit) {
        self.ledger.update_field(id, edit)
    }

    pub fn remove_row(&mut self, id: EntryId) {
        self.ledger.remove_row(id)
    }

    pub fn post_quick_entry(
        &mut self,
        template_id: &str,
        amount: &str,
    ) -> Result<Vec<LedgerEntry>, QuickEntryError> {
        apply_template(template_id, amount, &mut self.ledger)
    }

    pub fn set_budget_target(&mut self, category: BudgetCategory, value: impl Into<String>) {
        self.budget.set(category, value)
    }

    pub fn statement(&mut self) -> &Statement {
        let revision = self.ledger.revision();
        if !matches!(&self.cached, Some((cached, _)) if *cached == revision) {
            self.cached = None;
        }
        let ledger = &self.ledger;
        let (_, statement) = self.cached.get_or_insert_with(|| {
            let statement = Statement::derive(ledger.iter());
            if !statement.is_balanced() {
                tracing::warn!(
                    balance_delta = %statement.summary.balance_delta,
                    "assets do not equal liabilities plus equity"
                );
            }
            (revision, statement)
        });
        statement
    }

    pub fn comparison(&mut self) -> Vec<BudgetComparison> {
        let budget = self.budget.clone();
        compare(self.statement(), &budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cur, AccountType};

    #[test]
    fn statement_follows_mutations() {
        let mut session = Session::default();
        session.post_quick_entry("Owner Investment", "1000").unwrap();
        assert_eq!(session.statement().summary.equity, cur!(1000));

        let id = session.add_row();
        session.update_field(id, FieldEdit::Account("Owner Drawings".into()));
        session.update_field(id, FieldEdit::Type(AccountType::Drawings));
        session.update_field(id, FieldEdit::Amount("250".into()));
        assert_eq!(session.statement().summary.equity, cur!(750));

        session.remove_row(id);
        assert_eq!(session.statement().summary.equity, cur!(1000));
    }

    #[test]
    fn cached_statement_matches_fresh_derivation() {
        let mut session = Session::default();
        session.post_quick_entry("Invoice Customer", "42.5").unwrap();
        let cached = session.statement().clone();
        assert_eq!(cached, Statement::derive(session.ledger().iter()));
        assert_eq!(session.statement(), &cached);
    }

    #[test]
    fn failed_quick_entry_leaves_statement_alone() {
        let mut session = Session::default();
        session.post_quick_entry("Cash Sale", "10").unwrap();
        let before = session.statement().clone();
        assert!(session.post_quick_entry("Cash Sale", "nope").is_err());
        assert_eq!(session.statement(), &before);
    }

    #[test]
    fn comparison_uses_current_targets() {
        let mut session = Session::default();
        session.post_quick_entry("Cash Sale", "300").unwrap();
        session.set_budget_target(BudgetCategory::Revenue, "250");

        let rows = session.comparison();
        assert_eq!(rows[0].category, BudgetCategory::Revenue);
        assert_eq!(rows[0].actual, cur!(300));
        assert_eq!(rows[0].budget, cur!(250));
        assert_eq!(rows[0].variance(), cur!(50));
    }
}
