//! CLI command implementations

pub mod balance;
pub mod deposit;
pub mod logs;
pub mod new;
pub mod setup;
pub mod status;
pub mod withdraw;

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Input, Password};
use passbook_core::services::{LogEvent, LoggingService};
use passbook_core::{Error, PassbookContext};

/// Get the passbook directory from environment or default
pub fn get_passbook_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PASSBOOK_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".passbook")
    }
}

/// Get or create the passbook context
pub fn get_context() -> Result<PassbookContext> {
    let passbook_dir = get_passbook_dir();
    std::fs::create_dir_all(&passbook_dir)?;
    PassbookContext::new(&passbook_dir).map_err(|e| match e {
        Error::Config(msg) => anyhow::anyhow!("{} (run 'pb setup' first)", msg),
        other => anyhow::Error::new(other),
    })
}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let passbook_dir = get_passbook_dir();
    std::fs::create_dir_all(&passbook_dir).ok()?;
    LoggingService::new(&passbook_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Credentials gathered from flags, environment, or interactive prompts
pub struct Credentials {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Resolve holder credentials: names from flags or prompts, password from
/// the PASSBOOK_PASSWORD env var or a hidden prompt.
pub fn get_credentials(
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<Credentials> {
    let first_name = match first_name {
        Some(f) => f,
        None => Input::new().with_prompt("First name").interact_text()?,
    };
    let last_name = match last_name {
        Some(l) => l,
        None => Input::new().with_prompt("Last name").interact_text()?,
    };
    let password = get_password_or_prompt("Password")?;

    Ok(Credentials {
        first_name,
        last_name,
        password,
    })
}

/// Get password from the PASSBOOK_PASSWORD env var or prompt
pub fn get_password_or_prompt(prompt: &str) -> Result<String> {
    if let Ok(p) = std::env::var("PASSBOOK_PASSWORD") {
        return Ok(p);
    }
    Ok(Password::new().with_prompt(prompt).interact()?)
}
