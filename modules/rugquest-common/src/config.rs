use std::env;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Rounds per game.
    pub round_limit: u32,

    /// Delay between round supply attempts, in milliseconds.
    pub supply_retry_delay_ms: u64,

    /// Maximum supply attempts per round. Unset retries indefinitely.
    pub supply_max_attempts: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// defaults of the original game (5 rounds, 1s retry, no cap).
    pub fn from_env() -> Self {
        Self {
            round_limit: env::var("ROUND_LIMIT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .expect("ROUND_LIMIT must be a number"),
            supply_retry_delay_ms: env::var("SUPPLY_RETRY_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("SUPPLY_RETRY_DELAY_MS must be a number"),
            supply_max_attempts: env::var("SUPPLY_MAX_ATTEMPTS")
                .ok()
                .map(|v| v.parse().expect("SUPPLY_MAX_ATTEMPTS must be a number")),
        }
    }
}
