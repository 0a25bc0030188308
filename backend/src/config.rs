use std::{fmt::Display, str::FromStr};

use shuttle_runtime::SecretStore;
use tracing::{info, warn};

pub const DEFAULT_INCREMENT_LIMIT_PER_MINUTE: u32 = 30;
pub const DEFAULT_SUGGESTION_WINDOW_MINUTES: i64 = 10;
pub const DEFAULT_ARGUMENT_WINDOW_MINUTES: i64 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    pub admin_token: Option<String>,
    pub increment_limit_per_minute: u32,
    pub suggestion_window_minutes: i64,
    pub argument_window_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_token: None,
            increment_limit_per_minute: DEFAULT_INCREMENT_LIMIT_PER_MINUTE,
            suggestion_window_minutes: DEFAULT_SUGGESTION_WINDOW_MINUTES,
            argument_window_minutes: DEFAULT_ARGUMENT_WINDOW_MINUTES,
        }
    }
}

impl Config {
    pub fn from_secrets(secrets: &SecretStore) -> Self {
        Self::from_lookup(|key| secrets.get(key))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let admin_token = lookup("ADMIN_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if admin_token.is_none() {
            warn!("ADMIN_TOKEN not found - admin endpoints will reject every request");
        }

        Self {
            admin_token,
            increment_limit_per_minute: try_load(&lookup, "INCREMENT_LIMIT_PER_MINUTE", DEFAULT_INCREMENT_LIMIT_PER_MINUTE),
            suggestion_window_minutes: try_load(&lookup, "SUGGESTION_WINDOW_MINUTES", DEFAULT_SUGGESTION_WINDOW_MINUTES),
            argument_window_minutes: try_load(&lookup, "ARGUMENT_WINDOW_MINUTES", DEFAULT_ARGUMENT_WINDOW_MINUTES),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
