use eyre::Result;
use ledger_statements_lib::{
    compare, parse_budget_csv, parse_ledger_csv, write_comparison_csv, write_statement_csv,
    BudgetTargets, LedgerStore, Statement,
};
use std::{env, fs::File, io::BufReader};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let file_name = args
        .next()
        .ok_or(eyre::eyre!("Missing argument\nUsage: ledger.csv [budget.csv]"))?;
    let reader = BufReader::new(File::open(&file_name)?);

    let mut ledger = LedgerStore::default();
    let mut skipped = 0usize;
    let rows = parse_ledger_csv(reader)?
        .filter_map(|row| match row {
            Ok(row) => Some(row.into_draft()),
            Err(err) => {
                tracing::warn!(%err, "skipping ledger row");
                skipped += 1;
                None
            }
        })
        .collect::<Vec<_>>();
    ledger.bulk_append(rows);
    tracing::info!(entries = ledger.len(), skipped, file = %file_name, "loaded ledger");

    let budget = match args.next() {
        Some(budget_file) => parse_budget_csv(BufReader::new(File::open(budget_file)?))?,
        None => BudgetTargets::default(),
    };

    let statement = Statement::derive(ledger.iter());
    if !statement.is_balanced() {
        tracing::warn!(
            balance_delta = %statement.summary.balance_delta,
            "assets do not equal liabilities plus equity"
        );
    }

    let stdout = std::io::stdout();
    write_statement_csv(&statement, stdout.lock())?;
    println!();
    write_comparison_csv(&compare(&statement, &budget), stdout.lock())?;

    Ok(())
}
