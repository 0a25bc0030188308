use std::collections::HashMap;
use std::sync::Mutex;
use time::{OffsetDateTime, Duration};
use tracing::{warn, error};

use crate::error::ApiError;

#[derive(Debug)]
struct Window {
    attempts: u32,
    started: OffsetDateTime,
}

/// Fixed-window limiter keyed by caller fingerprint and action.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
    max_attempts: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_attempts: u32, window_minutes: i64) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_attempts: max_attempts.max(1),
            window: Duration::minutes(window_minutes.max(1)),
        }
    }

    pub fn check(&self, key: &str) -> Result<(), ApiError> {
        self.check_at(key, OffsetDateTime::now_utc())
    }

    pub fn check_at(&self, key: &str, now: OffsetDateTime) -> Result<(), ApiError> {
        let mut windows = self.windows.lock().map_err(|e| {
            error!("Failed to acquire rate limit lock: {}", e);
            ApiError::Internal("rate limiter lock poisoned".into())
        })?;

        windows.retain(|_, w| now - w.started <= self.window * 2);

        let window = windows.entry(key.to_string()).or_insert(Window { attempts: 0, started: now });
        if now - window.started > self.window {
            *window = Window { attempts: 0, started: now };
        }

        if window.attempts >= self.max_attempts {
            let minutes_to_wait = (window.started + self.window - now).whole_minutes().max(1);
            warn!("Rate limit triggered for key {}", key);
            return Err(ApiError::RateLimited(format!(
                "Rate limit exceeded. Please try again in {} minutes.",
                minutes_to_wait
            )));
        }

        window.attempts += 1;
        Ok(())
    }
}
