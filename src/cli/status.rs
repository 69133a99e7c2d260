use std::path::PathBuf;

use anyhow::Result;

use crate::db::{db_path, get_connection};
use crate::models::HealthStatus;
use crate::settings::load_settings;

pub fn run(data_dir: Option<&str>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = dir.to_string();
    }
    let dir = PathBuf::from(&settings.data_dir);
    let db_file = db_path(&dir);

    println!("Health:     {}", HealthStatus::ok().status);
    println!("Data dir:   {}", dir.display());
    println!("Database:   {}", db_file.display());
    println!("Rate limit: {}/min", settings.rate_limit_per_minute);
    println!("CORS:       {}", settings.origin_list().join(", "));

    if !db_file.exists() {
        println!();
        println!("Database not found. Run `bankfeed init` to set up.");
        return Ok(());
    }

    let size = std::fs::metadata(&db_file)?.len();
    println!("DB size:    {size} bytes");

    let conn = get_connection(&db_file)?;
    let transactions: i64 = conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
    let span: (Option<String>, Option<String>) = conn.query_row(
        "SELECT min(date), max(date) FROM transactions",
        [],
        |r| Ok((r.get(0)?, r.get(1)?)),
    )?;

    println!();
    println!("Transactions:  {transactions}");
    if let (Some(first), Some(last)) = span {
        println!("Date span:     {first} to {last}");
    }
    Ok(())
}
