//! Authentication service
//!
//! Looks an account up by normalized name, verifies the password digest,
//! and hands back an in-memory session snapshot. The lookup is deliberately
//! two-step - fetch by name, then compare digests - so "no such holder" and
//! "wrong password" stay distinguishable for user-facing messages.

use std::sync::Arc;

use crate::adapters::duckdb::AccountStore;
use crate::domain::result::{AuthFailure, Result};
use crate::domain::{Account, AuthenticatedSession};
use crate::services::CredentialHasher;

#[derive(Debug)]
pub struct AuthService {
    store: Arc<AccountStore>,
    hasher: Arc<CredentialHasher>,
}

impl AuthService {
    pub fn new(store: Arc<AccountStore>, hasher: Arc<CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    /// Authenticate a holder by name and password.
    ///
    /// Names are normalized the same way account creation normalizes them.
    /// If several rows share the name pair, the earliest-inserted one is
    /// authoritative. The digest comparison is byte-exact.
    pub fn authenticate(
        &self,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<AuthenticatedSession> {
        let first_name = Account::normalize_name(first_name);
        let last_name = Account::normalize_name(last_name);

        let supplied_digest = self.hasher.hash(password)?;

        let records = self.store.find_by_name(&first_name, &last_name)?;
        let record = records.into_iter().next().ok_or(AuthFailure::NotFound)?;

        if supplied_digest != record.password_hash {
            return Err(AuthFailure::PasswordMismatch.into());
        }

        Ok(AuthenticatedSession {
            first_name,
            last_name,
            balance: record.balance,
            password_hash: record.password_hash,
        })
    }
}
