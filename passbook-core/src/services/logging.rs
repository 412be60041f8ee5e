//! Logging service - structured event logging to DuckDB
//!
//! Privacy-safe event log stored in logs.duckdb, separate from account
//! data. No holder names, balances, or credentials are ever logged - only
//! event names, commands, and error messages.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use duckdb::{params, Connection};
use serde::{Deserialize, Serialize};

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    // Lower 48 bits timestamp, upper 16 bits counter
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

/// Get current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Detect the current platform
fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl LogEvent {
    /// Create a new log event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            command: None,
            error_message: None,
        }
    }

    /// Set the command context
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub command: Option<String>,
    pub error_message: Option<String>,
}

/// Service for structured event logging.
///
/// Manages logs.duckdb in the passbook directory. Callers should treat
/// logging as best-effort: a logging failure must never fail the operation
/// being logged.
pub struct LoggingService {
    conn: Mutex<Connection>,
    app_version: String,
    platform: &'static str,
    db_path: PathBuf,
}

impl LoggingService {
    /// Open or create logs.duckdb in the passbook directory
    pub fn new(passbook_dir: &Path, app_version: impl Into<String>) -> Result<Self> {
        let db_path = passbook_dir.join("logs.duckdb");
        let conn = Connection::open(&db_path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sys_events (
                id UBIGINT PRIMARY KEY,
                timestamp BIGINT NOT NULL,
                app_version TEXT NOT NULL,
                platform TEXT NOT NULL,
                event TEXT NOT NULL,
                command TEXT,
                error_message TEXT
            );",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            app_version: app_version.into(),
            platform: detect_platform(),
            db_path,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Record an event
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("lock poisoned: {}", e))?;
        conn.execute(
            "INSERT INTO sys_events (id, timestamp, app_version, platform, event, command, error_message)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                generate_id(),
                now_ms(),
                self.app_version,
                self.platform,
                event.event,
                event.command,
                event.error_message
            ],
        )?;
        Ok(())
    }

    /// Most recent entries, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("lock poisoned: {}", e))?;
        let mut stmt = conn.prepare(
            "SELECT id, timestamp, app_version, platform, event, command, error_message
             FROM sys_events ORDER BY timestamp DESC, id DESC LIMIT ?",
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            Ok(LogEntry {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                app_version: row.get(2)?,
                platform: row.get(3)?,
                event: row.get(4)?,
                command: row.get(5)?,
                error_message: row.get(6)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}
