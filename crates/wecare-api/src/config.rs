// Server configuration from environment variables
//
// | Variable                    | Required | Default   | Meaning                                |
// |-----------------------------|----------|-----------|----------------------------------------|
// | `PORT`                      | no       | 3000      | HTTP listen port                       |
// | `MONGODB_URI`               | yes      | -         | MongoDB connection string              |
// | `MONGODB_DB`                | no       | `eventDB` | database holding the event collections |
// | `IDENTITY_CREDENTIALS_FILE` | yes*     | -         | identity provider credential JSON      |
// | `WECARE_UNSAFE_NO_AUTH`     | no       | false     | accept any bearer token (dev only)     |
//
// *Not required when `WECARE_UNSAFE_NO_AUTH=true`.

use std::env;
use std::fs;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB: &str = "eventDB";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid port number: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),

    #[error("cannot use credential file {path}: {message}")]
    CredentialFile { path: String, message: String },
}

/// Credentials for the identity provider, loaded from the JSON file named by
/// `IDENTITY_CREDENTIALS_FILE`.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityCredentials {
    /// Expected audience of verified tokens.
    pub project_id: String,

    /// Override for the provider's token verification endpoint. Defaults to
    /// the provider's public tokeninfo URL when absent.
    #[serde(default)]
    pub verify_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_db: String,
    /// `None` only when `WECARE_UNSAFE_NO_AUTH` is set.
    pub credentials: Option<IdentityCredentials>,
}

impl Config {
    /// Parses configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let unsafe_no_auth = env::var("WECARE_UNSAFE_NO_AUTH")
            .map(|v| truthy(&v))
            .unwrap_or(false);

        let port = match env::var("PORT") {
            Ok(v) => v.trim().parse()?,
            Err(_) => DEFAULT_PORT,
        };

        let mongodb_uri = env::var("MONGODB_URI")
            .map_err(|_| ConfigError::MissingEnvVar("MONGODB_URI".into()))?;
        let mongodb_db = env::var("MONGODB_DB").unwrap_or_else(|_| DEFAULT_DB.to_string());

        let credentials = if unsafe_no_auth {
            tracing::warn!("WECARE_UNSAFE_NO_AUTH is set; token verification is DISABLED");
            None
        } else {
            let path = env::var("IDENTITY_CREDENTIALS_FILE")
                .map_err(|_| ConfigError::MissingEnvVar("IDENTITY_CREDENTIALS_FILE".into()))?;
            Some(load_credentials(&path)?)
        };

        Ok(Self {
            port,
            mongodb_uri,
            mongodb_db,
            credentials,
        })
    }
}

fn load_credentials(path: &str) -> Result<IdentityCredentials, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::CredentialFile {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    parse_credentials(&raw).map_err(|e| ConfigError::CredentialFile {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn parse_credentials(raw: &str) -> Result<IdentityCredentials, serde_json::Error> {
    serde_json::from_str(raw)
}

/// `1`, `true`, `yes` and `on` (any case) enable a boolean variable.
fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
