//! Passbook CLI - a single-user account ledger in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{balance, deposit, logs, new, setup, status, withdraw};

/// Passbook - single-user account ledger in your terminal
#[derive(Parser)]
#[command(name = "pb", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the passbook directory, salt file, and database
    Setup,

    /// Create new records
    New {
        #[command(subcommand)]
        command: new::NewCommands,
    },

    /// Authenticate and show the account balance
    Balance {
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

    /// Deposit an amount into the account
    Deposit {
        /// Amount to deposit
        amount: Option<String>,
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

    /// Withdraw an amount from the account
    Withdraw {
        /// Amount to withdraw
        amount: Option<String>,
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

    /// Show ledger status and summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recent event log entries
    Logs {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Setup => setup::run(),
        Commands::New { command } => new::run(command),
        Commands::Balance {
            first_name,
            last_name,
            json,
        } => balance::run(first_name, last_name, json),
        Commands::Deposit {
            amount,
            first_name,
            last_name,
            json,
        } => deposit::run(amount, first_name, last_name, json),
        Commands::Withdraw {
            amount,
            first_name,
            last_name,
            json,
        } => withdraw::run(amount, first_name, last_name, json),
        Commands::Status { json } => status::run(json),
        Commands::Logs { limit, json } => logs::run(limit, json),
    }
}
