//! Integration tests for passbook-core services
//!
//! These tests run the full authenticate-then-mutate protocol against a
//! real DuckDB file in a temp directory, with a real salt file and real
//! Argon2 digests.

use rust_decimal::Decimal;
use tempfile::TempDir;

use passbook_core::services::{CredentialHasher, SALT_FILE};
use passbook_core::{AuthFailure, Error, PassbookContext, ValidationError};

// ============================================================================
// Test Helpers
// ============================================================================

/// Set up a passbook directory (salt file included) and open a context
fn create_test_context(temp_dir: &TempDir) -> PassbookContext {
    CredentialHasher::generate_salt_file(&temp_dir.path().join(SALT_FILE))
        .expect("failed to generate salt");
    PassbookContext::new(temp_dir.path()).expect("failed to create context")
}

/// Shorthand for a two-decimal-place amount, e.g. amount(5000) == 50.00
fn amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

// ============================================================================
// Account creation and authentication
// ============================================================================

#[test]
fn test_create_then_authenticate_yields_zero_balance() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1234")
        .unwrap();

    let statement = ctx
        .ledger_service
        .balance("ada", "lovelace", "pass1234")
        .unwrap();
    assert_eq!(statement.balance, Decimal::ZERO);
    assert_eq!(statement.holder, "Ada Lovelace");
}

#[test]
fn test_names_are_case_normalized_on_both_ends() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("Ada", "LOVELACE", "pass1234", "pass1234")
        .unwrap();

    // Mixed-case credentials resolve to the same account
    let session = ctx
        .auth_service
        .authenticate("aDa", "Lovelace", "pass1234")
        .unwrap();
    assert_eq!(session.first_name, "ada");
    assert_eq!(session.last_name, "lovelace");
}

#[test]
fn test_wrong_password_is_mismatch_never_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1234")
        .unwrap();

    let err = ctx
        .auth_service
        .authenticate("ada", "lovelace", "wrong-password")
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthFailure::PasswordMismatch)));
}

#[test]
fn test_unknown_holder_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    let err = ctx
        .auth_service
        .authenticate("grace", "hopper", "pass1234")
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthFailure::NotFound)));
}

#[test]
fn test_password_confirmation_must_match() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    let err = ctx
        .ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1235")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::PasswordMismatch)
    ));

    // Nothing was written
    assert_eq!(ctx.store.count_accounts().unwrap(), 0);
}

#[test]
fn test_short_password_rejected_before_any_write() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    let err = ctx
        .ledger_service
        .create_account("ada", "lovelace", "short", "short")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::PasswordTooShort { min: 8 })
    ));
    assert_eq!(ctx.store.count_accounts().unwrap(), 0);
}

#[test]
fn test_duplicate_name_pair_first_match_is_authoritative() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "first-pw-1", "first-pw-1")
        .unwrap();
    ctx.ledger_service
        .create_account("ada", "lovelace", "second-pw-2", "second-pw-2")
        .unwrap();

    // The earlier row wins; the later account's password doesn't authenticate
    assert!(ctx
        .auth_service
        .authenticate("ada", "lovelace", "first-pw-1")
        .is_ok());
    let err = ctx
        .auth_service
        .authenticate("ada", "lovelace", "second-pw-2")
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthFailure::PasswordMismatch)));
}

// ============================================================================
// Deposits and withdrawals
// ============================================================================

#[test]
fn test_deposit_adds_exact_amount() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1234")
        .unwrap();

    let receipt = ctx
        .ledger_service
        .deposit("ada", "lovelace", "pass1234", amount(5000))
        .unwrap();
    assert_eq!(receipt.previous_balance, Decimal::ZERO);
    assert_eq!(receipt.new_balance, amount(5000));

    let statement = ctx
        .ledger_service
        .balance("ada", "lovelace", "pass1234")
        .unwrap();
    assert_eq!(statement.balance, amount(5000));
}

#[test]
fn test_negative_deposit_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1234")
        .unwrap();

    let err = ctx
        .ledger_service
        .deposit("ada", "lovelace", "pass1234", amount(-100))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::AmountOutOfRange { .. })
    ));
}

#[test]
fn test_overdraw_rejected_and_balance_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1234")
        .unwrap();
    ctx.ledger_service
        .deposit("ada", "lovelace", "pass1234", amount(3000))
        .unwrap();

    let err = ctx
        .ledger_service
        .withdraw("ada", "lovelace", "pass1234", amount(100_000))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::AmountOutOfRange { .. })
    ));

    let statement = ctx
        .ledger_service
        .balance("ada", "lovelace", "pass1234")
        .unwrap();
    assert_eq!(statement.balance, amount(3000));
}

#[test]
fn test_withdraw_up_to_full_balance_allowed() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1234")
        .unwrap();
    ctx.ledger_service
        .deposit("ada", "lovelace", "pass1234", amount(3000))
        .unwrap();

    let receipt = ctx
        .ledger_service
        .withdraw("ada", "lovelace", "pass1234", amount(3000))
        .unwrap();
    assert_eq!(receipt.new_balance, Decimal::ZERO);
}

#[test]
fn test_balance_is_sum_of_applied_deltas() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1234")
        .unwrap();

    let deposits = [1250, 4000, 99];
    let withdrawals = [300, 1049];
    for d in deposits {
        ctx.ledger_service
            .deposit("ada", "lovelace", "pass1234", amount(d))
            .unwrap();
    }
    for w in withdrawals {
        ctx.ledger_service
            .withdraw("ada", "lovelace", "pass1234", amount(w))
            .unwrap();
    }

    let expected = deposits.iter().sum::<i64>() - withdrawals.iter().sum::<i64>();
    let statement = ctx
        .ledger_service
        .balance("ada", "lovelace", "pass1234")
        .unwrap();
    assert_eq!(statement.balance, amount(expected));
}

/// The end-to-end scenario: create, deposit 50, withdraw 20, reject an
/// overdraw of 1000, and verify a wrong password exposes nothing.
#[test]
fn test_ada_lovelace_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = create_test_context(&temp_dir);

    ctx.ledger_service
        .create_account("ada", "lovelace", "pass1234", "pass1234")
        .unwrap();
    assert_eq!(
        ctx.ledger_service
            .balance("ada", "lovelace", "pass1234")
            .unwrap()
            .balance,
        Decimal::ZERO
    );

    ctx.ledger_service
        .deposit("ada", "lovelace", "pass1234", amount(5000))
        .unwrap();
    ctx.ledger_service
        .withdraw("ada", "lovelace", "pass1234", amount(2000))
        .unwrap();
    assert_eq!(
        ctx.ledger_service
            .balance("ada", "lovelace", "pass1234")
            .unwrap()
            .balance,
        amount(3000)
    );

    // Overdraw: rejected, no write
    assert!(ctx
        .ledger_service
        .withdraw("ada", "lovelace", "pass1234", amount(100_000))
        .is_err());
    assert_eq!(
        ctx.ledger_service
            .balance("ada", "lovelace", "pass1234")
            .unwrap()
            .balance,
        amount(3000)
    );

    // Wrong password: the balance is never exposed
    let err = ctx
        .ledger_service
        .balance("ada", "lovelace", "wrong")
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthFailure::PasswordMismatch)));
}

// ============================================================================
// Session and storage guarantees
// ============================================================================

#[test]
fn test_second_session_on_same_directory_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    let _ctx = create_test_context(&temp_dir);

    let err = PassbookContext::new(temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::SessionLocked));
}

#[test]
fn test_session_lock_released_on_drop() {
    let temp_dir = TempDir::new().unwrap();
    {
        let _ctx = create_test_context(&temp_dir);
    }
    // Previous context dropped; a new session opens cleanly
    let ctx = PassbookContext::new(temp_dir.path()).unwrap();
    assert_eq!(ctx.store.count_accounts().unwrap(), 0);
}

#[test]
fn test_missing_salt_file_is_fatal_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = PassbookContext::new(temp_dir.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_balances_survive_reopening_the_store() {
    let temp_dir = TempDir::new().unwrap();
    {
        let ctx = create_test_context(&temp_dir);
        ctx.ledger_service
            .create_account("ada", "lovelace", "pass1234", "pass1234")
            .unwrap();
        ctx.ledger_service
            .deposit("ada", "lovelace", "pass1234", amount(4200))
            .unwrap();
    }

    let ctx = PassbookContext::new(temp_dir.path()).unwrap();
    let statement = ctx
        .ledger_service
        .balance("ada", "lovelace", "pass1234")
        .unwrap();
    assert_eq!(statement.balance, amount(4200));
}
