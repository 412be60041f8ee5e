//! Status command - show ledger status and summary

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let account_count = ctx.store.count_accounts()?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "accounts": account_count,
                "database": ctx.store.db_path(),
                "currencySymbol": ctx.config.currency_symbol,
            }))?
        );
        return Ok(());
    }

    println!("{}", "Passbook Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Accounts", &account_count.to_string()]);
    table.add_row(vec![
        "Database",
        &ctx.store.db_path().display().to_string(),
    ]);
    table.add_row(vec!["Currency", &ctx.config.currency_symbol]);
    println!("{}", table);

    Ok(())
}
