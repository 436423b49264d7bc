use std::{path::PathBuf, time::Duration};

use rocket::figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment, Profile,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

pub const DEFAULT_PORT: u16 = 8080;

/// Service settings, read from the same figment as Rocket's own config.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CounterConfig {
    /// append-only file receiving one line per flushed window
    pub unique_log_path: PathBuf,
    pub flush_interval_secs: u64,
    /// unset means forwarded requests may block indefinitely
    pub forward_timeout_secs: Option<u64>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        CounterConfig {
            unique_log_path: PathBuf::from("uniqueReqLog.log"),
            flush_interval_secs: 60,
            forward_timeout_secs: None,
        }
    }
}

impl CounterConfig {
    pub fn from_figment(figment: &Figment) -> Result<CounterConfig> {
        let config: CounterConfig = figment.extract()?;
        if config.flush_interval_secs == 0 {
            return Err(ServiceError::ZeroFlushInterval);
        }
        Ok(config)
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs)
    }

    pub fn forward_timeout(&self) -> Option<Duration> {
        self.forward_timeout_secs.map(Duration::from_secs)
    }
}

/// Rocket's default figment with the service defaults layered underneath
/// `Rocket.toml` and `ROCKET_*` environment variables.
pub fn figment() -> Figment {
    Figment::from(rocket::Config::default())
        .merge(("port", DEFAULT_PORT))
        .merge(Serialized::defaults(CounterConfig::default()))
        .merge(Toml::file(Env::var_or("ROCKET_CONFIG", "Rocket.toml")).nested())
        .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]).global())
        .select(Profile::from_env_or(
            "ROCKET_PROFILE",
            rocket::Config::DEFAULT_PROFILE,
        ))
}
