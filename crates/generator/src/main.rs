use itertools::Itertools;
use ledger_statements_lib::{
    apply_template, write_ledger_csv, AccountType, EntryId, FieldEdit, LedgerStore, TemplateId,
    DEPRECIATION_EXPENSE,
};
use rand::prelude::*;
use rand::distributions::WeightedIndex;
use strum::IntoEnumIterator;

#[derive(Debug, Default)]
struct GeneratorState {
    ledger: LedgerStore,
    /// Non-current assets that can still be depreciated, with their amount in cents.
    depreciable: Vec<(EntryId, u64)>,
}

impl GeneratorState {
    fn post(mut self, template: TemplateId, cents: u64) -> Self {
        let amount = format_cents(cents);
        let posted = apply_template(&template.to_string(), &amount, &mut self.ledger)
            .expect("generated amounts are never zero");
        if template == TemplateId::BuyEquipmentOnCredit {
            self.depreciable.push((posted[0].id, cents));
        }
        self
    }

    /// Depreciates a random asset and books the matching expense so the ledger stays balanced.
    fn depreciate<R: Rng>(mut self, rng: &mut R) -> Self {
        if self.depreciable.is_empty() {
            return self;
        }
        let (id, cents) = self
            .depreciable
            .swap_remove(rng.gen_range(0..self.depreciable.len()));
        let depreciation = format_cents(rng.gen_range(1..=cents));

        self.ledger
            .update_field(id, FieldEdit::Depreciation(depreciation.clone()));
        let expense = self.ledger.add_row();
        self.ledger
            .update_field(expense, FieldEdit::Account(DEPRECIATION_EXPENSE.to_string()));
        self.ledger
            .update_field(expense, FieldEdit::Type(AccountType::Expense));
        self.ledger
            .update_field(expense, FieldEdit::Amount(depreciation));
        self
    }

    /// A half typed row, worth nothing to the statement.
    fn scribble<R: Rng>(mut self, rng: &mut R) -> Self {
        let id = self.ledger.add_row();
        let garbage = ["", "abc", "12..5", "-"].choose(rng).copied().unwrap_or_default();
        self.ledger
            .update_field(id, FieldEdit::Amount(garbage.to_string()));
        self
    }
}

fn format_cents(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

enum Step {
    Post(TemplateId),
    Depreciate,
    Scribble,
}

fn main() {
    let postings = std::env::args()
        .nth(1)
        .and_then(|n| n.parse().ok())
        .unwrap_or(100_000usize);

    //one weight per template followed by depreciation and garbage rows
    let mut steps = TemplateId::iter().map(Step::Post).collect_vec();
    let mut weights = itertools::repeat_n(10, steps.len()).collect_vec();
    steps.push(Step::Depreciate);
    weights.push(3);
    steps.push(Step::Scribble);
    weights.push(1);

    let dist = WeightedIndex::new(&weights).unwrap();
    let mut rng = thread_rng();

    let generator = (0..postings).fold(GeneratorState::default(), |state, _| {
        match &steps[dist.sample(&mut rng)] {
            Step::Post(template) => {
                let cents = rng.gen_range(1..10_000_000);
                state.post(*template, cents)
            }
            Step::Depreciate => state.depreciate(&mut rng),
            Step::Scribble => state.scribble(&mut rng),
        }
    });

    write_ledger_csv(&generator.ledger, std::io::stdout()).unwrap();
}
