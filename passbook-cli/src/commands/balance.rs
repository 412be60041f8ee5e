//! Balance command - authenticate and show the account balance

use anyhow::Result;
use colored::Colorize;
use passbook_core::services::LogEvent;

use super::{get_context, get_credentials, get_logger, log_event};
use crate::output;

pub fn run(first_name: Option<String>, last_name: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let creds = get_credentials(first_name, last_name)?;

    match ctx
        .ledger_service
        .balance(&creds.first_name, &creds.last_name, &creds.password)
    {
        Ok(statement) => {
            log_event(&logger, LogEvent::new("balance_shown").with_command("balance"));
            if json {
                println!("{}", serde_json::to_string_pretty(&statement)?);
            } else {
                println!("{}", "Account balance".bold());
                println!("  Account holder: {}", statement.holder);
                println!(
                    "  Balance: {}",
                    output::format_amount(&ctx.config.currency_symbol, statement.balance)
                );
            }
            Ok(())
        }
        Err(e) => {
            if e.is_user_recoverable() {
                log_event(
                    &logger,
                    LogEvent::new("auth_failed")
                        .with_command("balance")
                        .with_error(e.to_string()),
                );
            }
            Err(e.into())
        }
    }
}
