//! Client configuration
//!
//! Region and static credentials for the execution service. Built once per
//! process and handed to the client constructor.

use std::fmt;

use crate::error::{ClientError, Result};

/// Environment variable holding the AWS region
pub const REGION_VAR: &str = "DEV_REGION";
/// Environment variable holding the access key id
pub const ACCESS_KEY_VAR: &str = "DEV_ACCESS_KEY";
/// Environment variable holding the secret access key
pub const SECRET_KEY_VAR: &str = "DEV_SECRET_KEY";

/// Connection settings for the execution service
///
/// Anything left unset falls back to the AWS default provider chain
/// (environment, profile, instance role).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl ClientConfig {
    /// Reads the configuration from environment variables
    ///
    /// - DEV_REGION (optional)
    /// - DEV_ACCESS_KEY (optional, requires DEV_SECRET_KEY)
    /// - DEV_SECRET_KEY (optional, requires DEV_ACCESS_KEY)
    pub fn from_env() -> Self {
        Self {
            region: non_empty_var(REGION_VAR),
            access_key_id: non_empty_var(ACCESS_KEY_VAR),
            secret_access_key: non_empty_var(SECRET_KEY_VAR),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(_), None) => Err(ClientError::Config(
                "access key id given without a secret access key".to_string(),
            )),
            (None, Some(_)) => Err(ClientError::Config(
                "secret access key given without an access key id".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Static credentials, when both halves are configured
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(key_id), Some(secret)) => Some((key_id, secret)),
            _ => None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
