//! Runtime configuration structures and loaders.
use std::env;
use std::time::Duration;

use adventure_core::GameConfig;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Attempts per generation request, including the first one.
    pub max_generation_attempts: u32,
    /// Delay before the first retry; grows linearly with each attempt.
    pub retry_backoff: Duration,
    /// Fixed seed for the action roll. `None` draws a fresh seed per runtime.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            command_buffer_size: 32,
            event_buffer_size: 100,
            max_generation_attempts: 3,
            retry_backoff: Duration::from_millis(250),
            rng_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ADVENTURE_COMMAND_BUFFER` - Worker command queue size (default: 32)
    /// - `ADVENTURE_EVENT_BUFFER` - Event capacity per topic (default: 100)
    /// - `ADVENTURE_MAX_ATTEMPTS` - Attempts per generation request (default: 3)
    /// - `ADVENTURE_RETRY_BACKOFF_MS` - Base retry delay in ms (default: 250)
    /// - `ADVENTURE_RNG_SEED` - Fixed roll seed (default: random)
    /// - `ADVENTURE_CLAMP_HEALTH` - Clamp health after mutation (default: true)
    /// - `ADVENTURE_DEFENSIVE_BONUS_CAP` - Cap for the defensive bonus (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(capacity) = parse::<usize>(lookup("ADVENTURE_COMMAND_BUFFER")) {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = parse::<usize>(lookup("ADVENTURE_EVENT_BUFFER")) {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(attempts) = parse::<u32>(lookup("ADVENTURE_MAX_ATTEMPTS")) {
            config.max_generation_attempts = attempts.max(1);
        }
        if let Some(ms) = parse::<u64>(lookup("ADVENTURE_RETRY_BACKOFF_MS")) {
            config.retry_backoff = Duration::from_millis(ms);
        }
        config.rng_seed = parse::<u64>(lookup("ADVENTURE_RNG_SEED"));
        if let Some(clamp) = parse::<bool>(lookup("ADVENTURE_CLAMP_HEALTH")) {
            config.game_config.clamp_health = clamp;
        }
        config.game_config.defensive_bonus_cap =
            parse::<i32>(lookup("ADVENTURE_DEFENSIVE_BONUS_CAP"));

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}
