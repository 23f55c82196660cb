//! Trait abstractions for secret storage

use super::keychain::KeychainError;

/// Account-keyed secret storage
///
/// Implemented by [`super::KeychainProvider`] and by the in-memory test
/// double in `testing::mocks`.
pub trait SecretStore: Send + Sync {
    /// Store `value` under `key`, overwriting any existing value.
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if the store rejects the write
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError>;

    /// # Errors
    /// Returns `KeychainError::NotFound` if no secret exists for `key`
    fn get_secret(&self, key: &str) -> Result<String, KeychainError>;

    /// Delete the secret for `key`. Deleting a missing secret succeeds.
    ///
    /// # Errors
    /// Returns `KeychainError::AccessFailed` if the store rejects the delete
    fn delete_secret(&self, key: &str) -> Result<(), KeychainError>;

    /// Delete then write, so the slot holds only the new value.
    ///
    /// # Errors
    /// Propagates the first failing delete or write
    fn replace_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        self.delete_secret(key)?;
        self.set_secret(key, value)
    }

    fn secret_exists(&self, key: &str) -> bool {
        self.get_secret(key).is_ok()
    }
}
