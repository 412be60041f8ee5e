//! New command - create new records

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use dialoguer::{Input, Password};
use passbook_core::services::LogEvent;
use passbook_core::{Account, Error};

use super::{get_context, get_logger, log_event};

#[derive(Subcommand)]
pub enum NewCommands {
    /// Create a new account with balance 0
    Account {
        /// Account holder first name
        #[arg(long)]
        first_name: Option<String>,
        /// Account holder last name
        #[arg(long)]
        last_name: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: NewCommands) -> Result<()> {
    match command {
        NewCommands::Account {
            first_name,
            last_name,
            json,
        } => run_account(first_name, last_name, json),
    }
}

fn run_account(first_name: Option<String>, last_name: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let first_name = match first_name {
        Some(f) => f,
        None => Input::new().with_prompt("First name").interact_text()?,
    };
    let last_name = match last_name {
        Some(l) => l,
        None => Input::new().with_prompt("Last name").interact_text()?,
    };

    // PASSBOOK_PASSWORD skips both prompts (for scripting); the core still
    // validates length and confirmation.
    let (password, confirm) = if let Ok(p) = std::env::var("PASSBOOK_PASSWORD") {
        (p.clone(), p)
    } else {
        let p1 = Password::new().with_prompt("Password").interact()?;
        let p2 = Password::new().with_prompt("Confirm password").interact()?;
        (p1, p2)
    };

    match ctx
        .ledger_service
        .create_account(&first_name, &last_name, &password, &confirm)
    {
        Ok(result) => {
            log_event(&logger, LogEvent::new("account_created").with_command("new account"));
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", "Account created".green());
                println!(
                    "  Account holder: {} {}",
                    Account::display_name(&result.first_name),
                    Account::display_name(&result.last_name)
                );
            }
            Ok(())
        }
        Err(e) => {
            if let Error::Validation(_) = &e {
                log_event(
                    &logger,
                    LogEvent::new("create_rejected")
                        .with_command("new account")
                        .with_error(e.to_string()),
                );
            }
            Err(e.into())
        }
    }
}
