//! DuckDB account store
//!
//! Every operation opens its own connection, executes, and drops the
//! connection before returning. Nothing is shared across calls, so a failed
//! read cannot leak state into the next operation. The per-call setup cost
//! is acceptable for a single-user interactive system.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use duckdb::{params, Connection};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::result::{Error, Result};
use crate::services::MigrationService;

/// Maximum number of retries when the database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    // Windows error messages
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        // Unix/macOS error messages
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("file is already open")
}

/// One row matched by [`AccountStore::find_by_name`], in insertion order.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub balance: Decimal,
    pub password_hash: String,
}

/// DuckDB-backed account store.
///
/// Holds only the database path; connections are scoped to each call.
#[derive(Debug)]
pub struct AccountStore {
    db_path: PathBuf,
}

impl AccountStore {
    /// Create a store for the database at `db_path`. The file is created on
    /// first connection; call [`ensure_schema`](Self::ensure_schema) before
    /// any other operation.
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: db_path.to_path_buf(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection, retrying with exponential backoff if the
    /// file is locked by another process.
    fn connect(&self) -> std::result::Result<Connection, duckdb::Error> {
        let mut attempt = 0;
        loop {
            // Disable extension autoloading to avoid macOS code signing issues
            let config = duckdb::Config::default().enable_autoload_extension(false)?;
            match Connection::open_with_flags(&self.db_path, config) {
                Ok(conn) => return Ok(conn),
                Err(e) if is_retryable_error(&e.to_string()) && attempt < MAX_RETRIES - 1 => {
                    let delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Open or create the database and run pending migrations.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect().map_err(Error::storage_init)?;
        MigrationService::new(&conn)
            .run_pending()
            .map_err(Error::storage_init)?;
        Ok(())
    }

    /// Append a new account row with balance 0.
    ///
    /// No uniqueness is enforced on (first_name, last_name): duplicate name
    /// pairs are permitted, and lookups take the earliest match.
    pub fn insert_account(
        &self,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> Result<()> {
        let conn = self.connect().map_err(Error::storage_write)?;
        conn.execute(
            "INSERT INTO accounts (first_name, last_name, password_hash) VALUES (?, ?, ?)",
            params![first_name, last_name, password_hash],
        )
        .map_err(Error::storage_write)?;
        Ok(())
    }

    /// All rows matching the (already normalized) name pair, in insertion
    /// order. An empty vec means "not found".
    pub fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Vec<AccountRecord>> {
        let conn = self.connect().map_err(Error::storage_read)?;
        let mut stmt = conn
            .prepare(
                "SELECT balance, password_hash FROM accounts
                 WHERE first_name = ? AND last_name = ?
                 ORDER BY id",
            )
            .map_err(Error::storage_read)?;

        let rows = stmt
            .query_map(params![first_name, last_name], |row| {
                let balance: f64 = row.get(0)?;
                let password_hash: String = row.get(1)?;
                Ok((balance, password_hash))
            })
            .map_err(Error::storage_read)?;

        let mut records = Vec::new();
        for row in rows {
            let (balance, password_hash) = row.map_err(Error::storage_read)?;
            records.push(AccountRecord {
                balance: Decimal::try_from(balance).unwrap_or_default(),
                password_hash,
            });
        }
        Ok(records)
    }

    /// Set the balance for the row(s) matching name pair AND password hash.
    /// The compound key re-verifies identity at write time.
    ///
    /// Returns the number of rows updated. Zero means nothing matched -
    /// callers decide whether that is an error (ledger operations treat it
    /// as account-not-found rather than a silent no-op).
    pub fn update_balance(
        &self,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
        new_balance: Decimal,
    ) -> Result<usize> {
        let conn = self.connect().map_err(Error::storage_write)?;
        let updated = conn
            .execute(
                "UPDATE accounts SET balance = ?
                 WHERE first_name = ? AND last_name = ? AND password_hash = ?",
                params![
                    new_balance.to_f64().unwrap_or(0.0),
                    first_name,
                    last_name,
                    password_hash
                ],
            )
            .map_err(Error::storage_write)?;
        Ok(updated)
    }

    /// Total number of accounts
    pub fn count_accounts(&self) -> Result<i64> {
        let conn = self.connect().map_err(Error::storage_read)?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))
            .map_err(Error::storage_read)?;
        Ok(count)
    }
}
