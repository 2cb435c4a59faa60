use std::env;

use tracing::warn;

use crate::services::entity_store::StorePolicy;
use crate::utils::password::DEFAULT_ITERATIONS;

const MAX_TTL_HOURS: i64 = 24 * 366;
const DEFAULT_JWT_SECRET: &str = "forum-emi-dev-secret-change-me";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub seed_demo_data: bool,
    pub policy: StorePolicy,
    pub password_iterations: u32,
}

impl AppConfig {
    /// Variables d'environnement (après chargement du .env par dotenv)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET not set, using the development secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(get("APP_PORT"), "APP_PORT", 8080)?,
            database_url: get("DATABASE_URL"),
            jwt_secret,
            jwt_ttl_hours: parse_ttl_hours(get("JWT_TTL_HOURS"))?,
            seed_demo_data: parse_flag(get("SEED_DEMO_DATA"), "SEED_DEMO_DATA", true)?,
            policy: StorePolicy {
                enforce_room_conflicts: parse_flag(
                    get("ENFORCE_ROOM_CONFLICTS"),
                    "ENFORCE_ROOM_CONFLICTS",
                    true,
                )?,
                enforce_references: parse_flag(get("ENFORCE_REFERENCES"), "ENFORCE_REFERENCES", true)?,
            },
            password_iterations: parse_or(
                get("PASSWORD_ITERATIONS"),
                "PASSWORD_ITERATIONS",
                DEFAULT_ITERATIONS,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

/// Durée des sessions: entre 1 heure et un an
fn parse_ttl_hours(value: Option<String>) -> Result<i64, ConfigError> {
    let hours = parse_or(value.clone(), "JWT_TTL_HOURS", 24)?;
    if (1..=MAX_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(ConfigError::InvalidValue {
            key: "JWT_TTL_HOURS",
            value: value.unwrap_or_default(),
        })
    }
}

fn parse_flag(value: Option<String>, key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue { key, value }),
        },
    }
}
