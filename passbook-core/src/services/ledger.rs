//! Ledger operations - create account, show balance, deposit, withdraw
//!
//! Each operation is a single authenticate-then-mutate unit of work. Every
//! terminal branch other than the successful path leaves stored state
//! unchanged: validation happens before authentication, and authentication
//! happens before any write.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::adapters::duckdb::AccountStore;
use crate::domain::result::{Error, Result, ValidationError};
use crate::domain::{Account, AuthenticatedSession};
use crate::services::{AuthService, CredentialHasher};

/// Minimum accepted password length at account creation
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug)]
pub struct LedgerService {
    store: Arc<AccountStore>,
    hasher: Arc<CredentialHasher>,
    auth: Arc<AuthService>,
}

impl LedgerService {
    pub fn new(
        store: Arc<AccountStore>,
        hasher: Arc<CredentialHasher>,
        auth: Arc<AuthService>,
    ) -> Self {
        Self { store, hasher, auth }
    }

    /// Create a new account with balance 0.
    ///
    /// The password is validated (confirmation match, minimum length) before
    /// it is hashed. No duplicate check is performed: a second account with
    /// the same name pair is allowed, but only the first one is reachable
    /// through authentication.
    pub fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<CreateAccountResult> {
        if password != password_confirm {
            return Err(ValidationError::PasswordMismatch.into());
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            }
            .into());
        }

        let first_name = Account::normalize_name(first_name);
        let last_name = Account::normalize_name(last_name);
        if first_name.is_empty() {
            return Err(ValidationError::EmptyName { field: "first name" }.into());
        }
        if last_name.is_empty() {
            return Err(ValidationError::EmptyName { field: "last name" }.into());
        }

        let password_hash = self.hasher.hash(password)?;
        self.store
            .insert_account(&first_name, &last_name, &password_hash)?;

        Ok(CreateAccountResult {
            first_name,
            last_name,
        })
    }

    /// Authenticate and report the holder's balance
    pub fn balance(
        &self,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<BalanceStatement> {
        let session = self.auth.authenticate(first_name, last_name, password)?;
        Ok(BalanceStatement {
            holder: session.holder_name(),
            balance: session.balance,
        })
    }

    /// Deposit a non-negative amount
    pub fn deposit(
        &self,
        first_name: &str,
        last_name: &str,
        password: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::AmountOutOfRange {
                reason: "deposit amount cannot be negative".to_string(),
            }
            .into());
        }

        let session = self.auth.authenticate(first_name, last_name, password)?;
        let new_balance = session.balance + amount;
        self.commit_balance(&session, amount, new_balance)
    }

    /// Withdraw an amount bounded by the balance observed at
    /// authentication time
    pub fn withdraw(
        &self,
        first_name: &str,
        last_name: &str,
        password: &str,
        amount: Decimal,
    ) -> Result<TransferReceipt> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::AmountOutOfRange {
                reason: "withdraw amount cannot be negative".to_string(),
            }
            .into());
        }

        let session = self.auth.authenticate(first_name, last_name, password)?;
        if amount > session.balance {
            return Err(ValidationError::AmountOutOfRange {
                reason: format!(
                    "withdraw amount exceeds available balance of {:.2}",
                    session.balance
                ),
            }
            .into());
        }

        let new_balance = session.balance - amount;
        self.commit_balance(&session, -amount, new_balance)
    }

    /// Write the new balance keyed by the session's name pair and digest.
    ///
    /// Zero matched rows would historically be a silent no-op; here it is
    /// surfaced as not-found so a deposit or withdrawal can never appear to
    /// succeed without a write.
    fn commit_balance(
        &self,
        session: &AuthenticatedSession,
        amount: Decimal,
        new_balance: Decimal,
    ) -> Result<TransferReceipt> {
        let updated = self.store.update_balance(
            &session.first_name,
            &session.last_name,
            &session.password_hash,
            new_balance,
        )?;
        if updated == 0 {
            return Err(Error::not_found(format!(
                "no account row matched for {}",
                session.holder_name()
            )));
        }

        Ok(TransferReceipt {
            holder: session.holder_name(),
            previous_balance: session.balance,
            amount,
            new_balance,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateAccountResult {
    /// Normalized (lower-case) form as stored
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct BalanceStatement {
    pub holder: String,
    pub balance: Decimal,
}

/// Outcome of a committed deposit or withdrawal. The amount is signed:
/// positive for deposits, negative for withdrawals.
#[derive(Debug, Serialize)]
pub struct TransferReceipt {
    pub holder: String,
    pub previous_balance: Decimal,
    pub amount: Decimal,
    pub new_balance: Decimal,
}
