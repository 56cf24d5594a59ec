use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use strum::{Display, EnumString};

/// What the Google login does with a verified email that matches no employee.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RegistrationPolicy {
    /// Reject the login with 401.
    Strict,
    /// Create the employee on the fly.
    #[strum(to_string = "auto_register", serialize = "auto-register")]
    AutoRegister,
    /// Answer with the Google profile and `registered = false`, persist nothing.
    Guest,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,
    pub db_max_connections: u32,

    // Google tokeninfo
    pub tokeninfo_url: String,
    pub tokeninfo_timeout_secs: u64,
    pub registration_policy: RegistrationPolicy,

    // Rate limiting, 0 disables
    pub rate_login_per_min: u32,

    // "*" allows any origin
    pub cors_allowed_origins: Vec<String>,

    pub seed_demo_data: bool,
    pub log_dir: String,
}

fn var_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{key} has an invalid value"))
}

/// Splits a comma separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").context("SERVER_ADDR must be set")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            db_max_connections: var_or("DB_MAX_CONNECTIONS", "5")?,

            tokeninfo_url: env::var("GOOGLE_TOKENINFO_URL")
                .unwrap_or_else(|_| "https://oauth2.googleapis.com/tokeninfo".to_string()),
            tokeninfo_timeout_secs: var_or("TOKENINFO_TIMEOUT_SECS", "5")?,
            registration_policy: var_or("REGISTRATION_POLICY", "guest")?,

            rate_login_per_min: var_or("RATE_LOGIN_PER_MIN", "60")?,

            cors_allowed_origins: parse_origins(
                &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),

            seed_demo_data: var_or("SEED_DEMO_DATA", "false")?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for handler tests; nothing here is dialled.
    pub fn for_tests(policy: RegistrationPolicy) -> Self {
        Self {
            database_url: "mysql://localhost/test".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            api_prefix: "/api".to_string(),
            db_max_connections: 1,
            tokeninfo_url: "http://127.0.0.1:9/tokeninfo".to_string(),
            tokeninfo_timeout_secs: 1,
            registration_policy: policy,
            rate_login_per_min: 0,
            cors_allowed_origins: vec!["*".to_string()],
            seed_demo_data: false,
            log_dir: "logs".to_string(),
        }
    }
}
