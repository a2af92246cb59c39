use anyhow::{Context, Result, bail};
use storage::services::booking::BookingPolicy;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub api_keys: String,
    pub booking_policy: BookingPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive number")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            database_max_connections,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            booking_policy: BookingPolicy {
                reject_past_dates: env_flag("BOOKING_REJECT_PAST_DATES", true)?,
                require_qualified_trainer: env_flag("BOOKING_REQUIRE_QUALIFIED_TRAINER", true)?,
            },
        })
    }
}

fn env_flag(name: &str, default: bool) -> Result<bool> {
    match std::env::var(name) {
        Ok(raw) => parse_flag(&raw).with_context(|| format!("Invalid value for {}", name)),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected true or false, got '{}'", other),
    }
}
