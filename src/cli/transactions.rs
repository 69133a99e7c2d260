use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::api::Api;
use crate::cli::load_context;
use crate::query::TransactionQuery;

pub fn run(
    from: Option<String>,
    to: Option<String>,
    page: i64,
    limit: i64,
    json: bool,
    data_dir: Option<&str>,
) -> Result<()> {
    let ctx = load_context(data_dir)?;
    let api = Api::new(ctx);
    let query = TransactionQuery {
        from,
        to,
        page: Some(page),
        limit: Some(limit),
    };
    let result = api.transactions(&query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Amount", "Currency", "Balance"]);
    for txn in &result.data {
        table.add_row(vec![
            Cell::new(&txn.date),
            Cell::new(&txn.description),
            Cell::new(txn.amount),
            Cell::new(&txn.currency),
            Cell::new(txn.balance.map(|b| b.to_string()).unwrap_or_default()),
        ]);
    }
    println!(
        "Transactions page {} ({} total)\n{table}",
        result.page, result.total
    );
    Ok(())
}
