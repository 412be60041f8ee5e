//! Withdraw command - authenticate and subtract from the balance

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;
use passbook_core::services::LogEvent;
use rust_decimal::Decimal;

use super::{get_context, get_credentials, get_logger, log_event};
use crate::output;

pub fn run(
    amount: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let creds = get_credentials(first_name, last_name)?;

    let amount_str = match amount {
        Some(a) => a,
        None => Input::new().with_prompt("Withdraw amount").interact_text()?,
    };
    let amount: Decimal = amount_str
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", amount_str))?;

    match ctx
        .ledger_service
        .withdraw(&creds.first_name, &creds.last_name, &creds.password, amount)
    {
        Ok(receipt) => {
            log_event(&logger, LogEvent::new("withdraw").with_command("withdraw"));
            if json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                println!("{}", "Withdrawal complete".green());
                println!("  Account holder: {}", receipt.holder);
                println!(
                    "  New balance: {}",
                    output::format_amount(&ctx.config.currency_symbol, receipt.new_balance)
                );
            }
            Ok(())
        }
        Err(e) => {
            if e.is_user_recoverable() {
                log_event(
                    &logger,
                    LogEvent::new("withdraw_rejected")
                        .with_command("withdraw")
                        .with_error(e.to_string()),
                );
            }
            Err(e.into())
        }
    }
}
