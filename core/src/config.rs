//! Environment selection and credentials for the booking API client.
//!
//! # Design
//! Exactly two deployments are recognized, `test` and `prod`, each resolving
//! to its own base URL. An unrecognized selector is a fatal configuration
//! error raised here, before any network activity. Credentials default to
//! the reference API's fixed pair so a plain `ENVIRONMENT=test` run works
//! out of the box.

use std::str::FromStr;

use crate::error::ApiError;

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "password123";

/// Deployment selector, read from the `ENVIRONMENT` variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Test,
    Prod,
}

impl FromStr for Environment {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "test" => Ok(Environment::Test),
            "prod" => Ok(Environment::Prod),
            other => Err(ApiError::UnsupportedEnvironment(other.to_string())),
        }
    }
}

/// Resolved client configuration: one base URL and one credential pair,
/// fixed for the lifetime of a client.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Build a config from the process environment.
    ///
    /// Reads `ENVIRONMENT`, then `TEST_BASE_URL` or `PROD_BASE_URL` per the
    /// selector. `API_USERNAME` / `API_PASSWORD` override the default
    /// credential pair.
    pub fn from_env() -> Result<Self, ApiError> {
        let selector =
            std::env::var("ENVIRONMENT").map_err(|_| ApiError::MissingConfig("ENVIRONMENT"))?;
        let environment: Environment = selector.parse()?;
        let base_url = match environment {
            Environment::Test => std::env::var("TEST_BASE_URL")
                .map_err(|_| ApiError::MissingConfig("TEST_BASE_URL"))?,
            Environment::Prod => std::env::var("PROD_BASE_URL")
                .map_err(|_| ApiError::MissingConfig("PROD_BASE_URL"))?,
        };
        let username =
            std::env::var("API_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.to_string());
        let password =
            std::env::var("API_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());
        Ok(Self::new(&base_url, &username, &password))
    }
}
