//! Passbook Core - business logic for the single-user account ledger
//!
//! This crate implements the core domain logic following hexagonal
//! architecture:
//!
//! - **domain**: Core business entities (Account, AuthenticatedSession)
//! - **services**: Business logic orchestration (auth, ledger, hashing)
//! - **adapters**: Concrete implementations (DuckDB account store)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod migrations;
pub mod services;

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use fs2::FileExt;

use adapters::duckdb::AccountStore;
use config::Config;
use services::{AuthService, CredentialHasher, LedgerService, SALT_FILE};

// Re-export commonly used types at crate root
pub use domain::result::{AuthFailure, Error, Result, ValidationError};
pub use domain::{Account, AuthenticatedSession};

/// Account database file name inside the passbook directory
pub const DB_FILE: &str = "passbook.duckdb";

/// Lock file name for the single-session guard
const LOCK_FILE: &str = "passbook.lock";

/// Main context for Passbook operations
///
/// This is the primary entry point for all business logic. It holds the
/// configuration, the account store, the credential hasher, and the
/// services. Constructing it acquires an exclusive advisory lock on the
/// passbook directory: the system is single-user-at-a-time by design, and a
/// second live context is refused rather than risking lost updates from
/// interleaved read-modify-write cycles.
#[derive(Debug)]
pub struct PassbookContext {
    pub config: Config,
    pub store: Arc<AccountStore>,
    pub hasher: Arc<CredentialHasher>,
    pub auth_service: Arc<AuthService>,
    pub ledger_service: LedgerService,
    // Held for the lifetime of the context; the lock releases on drop.
    _session_lock: File,
}

impl PassbookContext {
    /// Create a new Passbook context
    ///
    /// Fails with [`Error::Config`] if the salt file is missing - that is a
    /// fatal setup problem, not a per-operation failure - and with
    /// [`Error::SessionLocked`] if another session holds the directory.
    pub fn new(passbook_dir: &Path) -> Result<Self> {
        let config = Config::load(passbook_dir)?;
        let session_lock = acquire_session_lock(passbook_dir)?;

        let hasher = Arc::new(CredentialHasher::from_salt_file(
            &passbook_dir.join(SALT_FILE),
        )?);

        let store = Arc::new(AccountStore::new(&passbook_dir.join(DB_FILE)));
        store.ensure_schema()?;

        let auth_service = Arc::new(AuthService::new(Arc::clone(&store), Arc::clone(&hasher)));
        let ledger_service = LedgerService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&auth_service),
        );

        Ok(Self {
            config,
            store,
            hasher,
            auth_service,
            ledger_service,
            _session_lock: session_lock,
        })
    }
}

fn acquire_session_lock(passbook_dir: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .open(passbook_dir.join(LOCK_FILE))?;
    file.try_lock_exclusive().map_err(|_| Error::SessionLocked)?;
    Ok(file)
}
