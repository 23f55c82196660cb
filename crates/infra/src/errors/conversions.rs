//! Conversions from external infrastructure errors into domain errors.

use keyring::Error as KeyringError;
use psso_common::security::KeychainError;
use psso_domain::PssoError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PssoError);

impl From<InfraError> for PssoError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PssoError> for InfraError {
    fn from(value: PssoError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPssoError {
    fn into_psso(self) -> PssoError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → PssoError */
/* -------------------------------------------------------------------------- */

impl IntoPssoError for KeyringError {
    fn into_psso(self) -> PssoError {
        match self {
            KeyringError::NoEntry => PssoError::Storage("keychain entry not found".into()),
            KeyringError::NoStorageAccess(err) => {
                PssoError::Storage(format!("keychain is not accessible: {err}"))
            }
            KeyringError::BadEncoding(_) => {
                PssoError::Storage("credential in keychain is not valid UTF-8".into())
            }
            KeyringError::TooLong(name, limit) => PssoError::Storage(format!(
                "keychain attribute '{name}' exceeds platform limit ({limit})"
            )),
            other => PssoError::Storage(format!("keychain failure: {other}")),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_psso())
    }
}

/* -------------------------------------------------------------------------- */
/* KeychainError → PssoError */
/* -------------------------------------------------------------------------- */

impl IntoPssoError for KeychainError {
    fn into_psso(self) -> PssoError {
        match self {
            KeychainError::NotFound => PssoError::Storage("keychain entry not found".into()),
            KeychainError::AccessFailed(message) => PssoError::Storage(message),
            KeychainError::Serialization(err) => {
                PssoError::Storage(format!("keychain payload could not be encoded: {err}"))
            }
            KeychainError::Keyring(err) => err.into_psso(),
        }
    }
}

impl From<KeychainError> for InfraError {
    fn from(value: KeychainError) -> Self {
        InfraError(value.into_psso())
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PssoError */
/* -------------------------------------------------------------------------- */

impl IntoPssoError for HttpError {
    fn into_psso(self) -> PssoError {
        if self.is_timeout() {
            return PssoError::TransportFailure("token endpoint request timed out".into());
        }
        if self.is_connect() {
            return PssoError::TransportFailure(format!("could not reach token endpoint: {self}"));
        }
        if self.is_decode() {
            return PssoError::ProtocolError(format!("token endpoint body unreadable: {self}"));
        }
        if self.is_builder() {
            return PssoError::ConfigurationInvalid(format!("token request is malformed: {self}"));
        }

        PssoError::TransportFailure(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_psso())
    }
}
