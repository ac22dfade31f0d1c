//! CredentialVault: one-way password digests.
//!
//! Digests are argon2id PHC strings with a fresh random salt per call, so the
//! same password never produces the same digest twice.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Credential vault errors.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Failed to hash secret: {0}")]
    Hash(String),

    #[error("Stored digest is malformed: {0}")]
    MalformedDigest(String),

    #[error("Hashing task failed: {0}")]
    Worker(String),
}

/// Hashes and verifies secrets.
#[derive(Debug, Clone)]
pub struct CredentialVault {
    params: Params,
}

impl Default for CredentialVault {
    fn default() -> Self {
        CredentialVault::new(Params::default())
    }
}

impl CredentialVault {
    /// Creates a vault hashing with the given argon2 cost parameters.
    pub fn new(params: Params) -> Self {
        CredentialVault { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a secret into a PHC string.
    pub fn hash(&self, secret: &str) -> Result<String, VaultError> {
        let salt = SaltString::generate(&mut OsRng);

        let digest = self
            .argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| VaultError::Hash(e.to_string()))?;

        Ok(digest.to_string())
    }

    /// Checks `candidate` against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; only an unparsable digest is an error.
    /// Cost parameters are taken from the digest itself.
    pub fn verify(&self, digest: &str, candidate: &str) -> Result<bool, VaultError> {
        let parsed =
            PasswordHash::new(digest).map_err(|e| VaultError::MalformedDigest(e.to_string()))?;

        match self.argon2().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(VaultError::MalformedDigest(e.to_string())),
        }
    }

    /// [`hash`](Self::hash) on the blocking thread pool.
    pub async fn hash_blocking(&self, secret: String) -> Result<String, VaultError> {
        let vault = self.clone();
        tokio::task::spawn_blocking(move || vault.hash(&secret))
            .await
            .map_err(|e| VaultError::Worker(e.to_string()))?
    }

    /// [`verify`](Self::verify) on the blocking thread pool.
    pub async fn verify_blocking(
        &self,
        digest: String,
        candidate: String,
    ) -> Result<bool, VaultError> {
        let vault = self.clone();
        tokio::task::spawn_blocking(move || vault.verify(&digest, &candidate))
            .await
            .map_err(|e| VaultError::Worker(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault() -> CredentialVault {
        CredentialVault::new(Params::new(1024, 1, 1, None).unwrap())
    }

    #[test]
    fn test_hash_and_verify() {
        let vault = vault();
        let digest = vault.hash("correct horse").unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert!(vault.verify(&digest, "correct horse").unwrap());
        assert!(!vault.verify(&digest, "wrong horse").unwrap());
    }

    #[test]
    fn test_salt_differs_per_call() {
        let vault = vault();
        let a = vault.hash("same").unwrap();
        let b = vault.hash("same").unwrap();

        assert_ne!(a, b);
        assert!(vault.verify(&a, "same").unwrap());
        assert!(vault.verify(&b, "same").unwrap());
    }

    #[test]
    fn test_malformed_digest_is_error() {
        let result = vault().verify("not-a-phc-string", "anything");
        assert!(matches!(result, Err(VaultError::MalformedDigest(_))));
    }

    #[test]
    fn test_verifies_digest_from_other_cost() {
        let strong = CredentialVault::default().hash("pw123456").unwrap();
        assert!(vault().verify(&strong, "pw123456").unwrap());
    }

    #[tokio::test]
    async fn test_blocking_variants() {
        let vault = vault();
        let digest = vault.hash_blocking("secret".to_string()).await.unwrap();
        assert!(vault
            .verify_blocking(digest, "secret".to_string())
            .await
            .unwrap());
    }
}
