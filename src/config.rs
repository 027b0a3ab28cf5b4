use std::env;

use crate::error::{RatingsError, Result};

/// Reddit API credentials, read once at startup and handed to the post
/// source. Nothing deeper in the pipeline sees these.
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub reddit_username: String,
    pub reddit_password: String,
}

impl SecretConfig {
    /// Loads credentials from the environment, honoring a local `.env`.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Ok(SecretConfig {
            reddit_client_id: required_var("REDDIT_CLIENT_ID")?,
            reddit_client_secret: required_var("REDDIT_CLIENT_SECRET")?,
            reddit_username: required_var("REDDIT_USERNAME")?,
            reddit_password: required_var("REDDIT_PASSWORD")?,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| RatingsError::Config(format!("missing environment variable {name}")))
}

/// Deployment prefix used to derive table names, e.g. `dev_toonami_ratings`.
pub fn environment_prefix() -> String {
    env::var("RATINGS_ENVIRONMENT").unwrap_or_else(|_| "dev".to_string())
}
