//! Retry policy for round supply.

use std::time::Duration;

/// Base delay between supply attempts.
const SUPPLY_RETRY_BASE: Duration = Duration::from_secs(1);

/// How the engine retries a failed round fetch.
///
/// The default retries forever at a fixed one-second delay: a broken
/// supplier manifests as an indefinite loading state, never as an error
/// the player can hit. Set `max_attempts` to give up after N tries
/// instead; exhaustion is logged and the game stays in the loading
/// phase.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Delay between supply attempts.
    pub delay: Duration,
    /// Maximum attempts per round. `None` retries indefinitely.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: SUPPLY_RETRY_BASE,
            max_attempts: None,
        }
    }
}
