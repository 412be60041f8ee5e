//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and store interactions. Each service
//! focuses on a specific use case or feature area.

mod auth;
mod hasher;
mod ledger;
pub mod logging;
pub mod migration;

pub use auth::AuthService;
pub use hasher::{CredentialHasher, SALT_FILE};
pub use ledger::{
    BalanceStatement, CreateAccountResult, LedgerService, TransferReceipt, MIN_PASSWORD_LEN,
};
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
