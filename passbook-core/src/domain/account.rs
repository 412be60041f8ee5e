//! Account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored account: a named holder, their balance, and their credential
/// digest. The store is the single source of truth - there is no in-memory
/// account registry.
///
/// Note: (first_name, last_name) is the lookup key but is NOT unique in the
/// schema. Duplicate name pairs are permitted; authentication takes the
/// earliest-inserted match (lowest id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Assigned by the store from a sequence, immutable.
    pub id: i64,
    /// Lower-case normalized.
    pub first_name: String,
    /// Lower-case normalized.
    pub last_name: String,
    /// Non-negative; mutated only through ledger operations.
    pub balance: Decimal,
    /// Hex-encoded digest from the credential hasher. Set once at creation,
    /// never updated (there is no password-change operation).
    pub password_hash: String,
}

impl Account {
    /// Normalize a name component the way both account creation and
    /// authentication must: trimmed, lower-cased.
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Title-cased display form of a normalized name ("ada" -> "Ada").
    pub fn display_name(name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Validate account data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.first_name.trim().is_empty() {
            return Err("first name cannot be empty");
        }
        if self.last_name.trim().is_empty() {
            return Err("last name cannot be empty");
        }
        if self.balance < Decimal::ZERO {
            return Err("balance cannot be negative");
        }
        if self.password_hash.is_empty() {
            return Err("password hash cannot be empty");
        }
        Ok(())
    }
}

/// Transient snapshot of an account produced by a successful authentication.
///
/// Consumed by exactly one ledger operation and then discarded - never
/// persisted, cached, or shared across operations. The balance here is the
/// value observed at authentication time; deposit/withdraw compute the new
/// balance from it.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub first_name: String,
    pub last_name: String,
    pub balance: Decimal,
    pub password_hash: String,
}

impl AuthenticatedSession {
    /// "Ada Lovelace" form for user-facing output.
    pub fn holder_name(&self) -> String {
        format!(
            "{} {}",
            Account::display_name(&self.first_name),
            Account::display_name(&self.last_name)
        )
    }
}
