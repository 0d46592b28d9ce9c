use std::path::PathBuf;

use crate::config::{AuthConfig, AuthMode};
use crate::error::{AppError, Result};

/// Where the database secret comes from. A token file is re-read on every
/// (re)connect so externally rotated short-lived tokens are picked up.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    Password(String),
    TokenFile(PathBuf),
}

impl CredentialSource {
    pub fn from_auth(auth: &AuthConfig) -> Result<Self> {
        match auth.mode {
            AuthMode::Password => match &auth.password {
                Some(password) => Ok(CredentialSource::Password(password.clone())),
                None => Err(AppError::Credential(
                    "Missing database password. Set auth.password in config.toml.".to_string(),
                )),
            },
            AuthMode::TokenFile => match &auth.token_file {
                Some(path) => Ok(CredentialSource::TokenFile(path.clone())),
                None => Err(AppError::Credential(
                    "Missing token file path. Set auth.token_file in config.toml.".to_string(),
                )),
            },
        }
    }

    /// The secret to present on the next connection attempt.
    pub fn resolve(&self) -> Result<String> {
        match self {
            CredentialSource::Password(password) => {
                if password.is_empty() {
                    return Err(AppError::Credential(
                        "Database password is empty.".to_string(),
                    ));
                }
                Ok(password.clone())
            }
            CredentialSource::TokenFile(path) => {
                let token = std::fs::read_to_string(path).map_err(|e| {
                    AppError::Credential(format!(
                        "Missing OAuth token. Could not read {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let token = token.trim();
                if token.is_empty() {
                    return Err(AppError::Credential(format!(
                        "Missing OAuth token. {} is empty.",
                        path.display()
                    )));
                }
                Ok(token.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn password_mode_requires_a_password() {
        let auth = AuthConfig {
            mode: AuthMode::Password,
            password: None,
            token_file: None,
        };
        assert!(matches!(
            CredentialSource::from_auth(&auth),
            Err(AppError::Credential(_))
        ));
    }

    #[test]
    fn static_password_resolves_as_is() {
        let source = CredentialSource::Password("s3cret".to_string());
        assert_eq!(source.resolve().unwrap(), "s3cret");
    }

    #[test]
    fn token_file_is_read_fresh_each_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "first-token\n").unwrap();

        let source = CredentialSource::TokenFile(path.clone());
        assert_eq!(source.resolve().unwrap(), "first-token");

        // Simulate an external rotation
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "second-token").unwrap();
        assert_eq!(source.resolve().unwrap(), "second-token");
    }

    #[test]
    fn empty_token_file_is_a_credential_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();

        let source = CredentialSource::TokenFile(path);
        assert!(matches!(source.resolve(), Err(AppError::Credential(_))));
    }

    #[test]
    fn missing_token_file_is_a_credential_error() {
        let source = CredentialSource::TokenFile(PathBuf::from("/nonexistent/token"));
        let err = source.resolve().unwrap_err();
        assert!(err.to_string().contains("Missing OAuth token"));
    }
}
