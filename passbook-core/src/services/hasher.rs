//! Credential hasher - deterministic salted password digests
//!
//! Uses Argon2id keyed by a process-wide salt loaded once from a salt file
//! in the passbook directory. The same password and salt always produce the
//! same digest, so authentication is a byte-exact comparison against the
//! stored value. Digests are hex-encoded for storage; plaintext passwords
//! are never stored or compared.

use std::fs;
use std::path::Path;

use base64::Engine;

use crate::domain::result::{Error, Result};

/// Argon2 parameters, chosen for interactive CLI latency
const TIME_COST: u32 = 3;
const MEMORY_COST: u32 = 4096; // KiB
const PARALLELISM: u32 = 1;
const DIGEST_LEN: usize = 32;

/// Salt file name inside the passbook directory (base64 text)
pub const SALT_FILE: &str = "salt.b64";

/// Raw salt length written by setup
const SALT_LEN: usize = 16;

/// Minimum salt length accepted when loading
const MIN_SALT_LEN: usize = 8;

/// Deterministic salted password hasher.
///
/// The salt is loaded exactly once at construction. A missing or unreadable
/// salt file is a fatal configuration error, never a per-call failure.
#[derive(Debug)]
pub struct CredentialHasher {
    salt: Vec<u8>,
}

impl CredentialHasher {
    /// Create a hasher from raw salt bytes
    pub fn new(salt: Vec<u8>) -> Result<Self> {
        if salt.len() < MIN_SALT_LEN {
            return Err(Error::config(format!(
                "salt must be at least {} bytes, got {}",
                MIN_SALT_LEN,
                salt.len()
            )));
        }
        Ok(Self { salt })
    }

    /// Load the process-wide salt from a base64 text file
    pub fn from_salt_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read salt file {}: {}", path.display(), e))
        })?;

        let salt = base64::engine::general_purpose::STANDARD
            .decode(content.trim())
            .map_err(|e| {
                Error::config(format!("invalid salt file {}: {}", path.display(), e))
            })?;

        Self::new(salt)
    }

    /// Compute the hex-encoded digest for a password.
    ///
    /// Deterministic: the same password always yields the same digest for
    /// this hasher's salt.
    pub fn hash(&self, password: &str) -> Result<String> {
        let params = argon2::Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(DIGEST_LEN))
            .map_err(|e| Error::config(format!("invalid argon2 parameters: {:?}", e)))?;

        let argon2 = argon2::Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        );

        let mut digest = vec![0u8; DIGEST_LEN];
        argon2
            .hash_password_into(password.as_bytes(), &self.salt, &mut digest)
            .map_err(|e| Error::config(format!("failed to derive digest: {:?}", e)))?;

        Ok(hex::encode(digest))
    }

    /// Byte-exact digest verification. Partial or prefix matches fail.
    pub fn verify(&self, stored_digest: &str, password: &str) -> Result<bool> {
        Ok(self.hash(password)? == stored_digest)
    }

    /// Generate a fresh salt file. Refuses to overwrite an existing one,
    /// since replacing the salt would invalidate every stored digest.
    pub fn generate_salt_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(Error::config(format!(
                "salt file already exists: {}",
                path.display()
            )));
        }

        use rand::Rng;
        let salt: [u8; SALT_LEN] = rand::thread_rng().gen();
        let encoded = base64::engine::general_purpose::STANDARD.encode(salt);
        fs::write(path, encoded)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> CredentialHasher {
        CredentialHasher::new(b"0123456789abcdef".to_vec()).unwrap()
    }

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = test_hasher();
        let a = hasher.hash("pass1234").unwrap();
        let b = hasher.hash("pass1234").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), DIGEST_LEN * 2); // hex
    }

    #[test]
    fn test_different_passwords_differ() {
        let hasher = test_hasher();
        let a = hasher.hash("pass1234").unwrap();
        let b = hasher.hash("pass12345").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_salts_differ() {
        let a = test_hasher().hash("pass1234").unwrap();
        let b = CredentialHasher::new(b"fedcba9876543210".to_vec())
            .unwrap()
            .hash("pass1234")
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_requires_exact_match() {
        let hasher = test_hasher();
        let digest = hasher.hash("pass1234").unwrap();
        assert!(hasher.verify(&digest, "pass1234").unwrap());
        assert!(!hasher.verify(&digest, "pass1235").unwrap());
        // Prefix of the stored digest must not verify
        assert!(!hasher.verify(&digest[..32], "pass1234").unwrap());
    }

    #[test]
    fn test_short_salt_rejected() {
        assert!(CredentialHasher::new(b"short".to_vec()).is_err());
    }

    #[test]
    fn test_salt_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SALT_FILE);

        CredentialHasher::generate_salt_file(&path).unwrap();
        let hasher = CredentialHasher::from_salt_file(&path).unwrap();
        let digest = hasher.hash("pass1234").unwrap();

        // Reloading the same salt gives the same digest
        let reloaded = CredentialHasher::from_salt_file(&path).unwrap();
        assert_eq!(reloaded.hash("pass1234").unwrap(), digest);

        // A second generate must refuse to clobber the salt
        assert!(CredentialHasher::generate_salt_file(&path).is_err());
    }

    #[test]
    fn test_missing_salt_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CredentialHasher::from_salt_file(&dir.path().join("nope.b64")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
