//! Service configuration loaded from environment variables.

use serde::{Deserialize, Deserializer};

use crate::error::{Result, ServiceError};

/// Which of the two item services a process runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instance {
    /// First service, port 3001 by default.
    RunA,
    /// Second service, port 3002 by default.
    RunB,
}

impl Instance {
    /// Display name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Instance::RunA => "RunA",
            Instance::RunB => "RunB",
        }
    }

    /// Port used when `PORT` is not set.
    pub fn default_port(self) -> u16 {
        match self {
            Instance::RunA => 3001,
            Instance::RunB => 3002,
        }
    }

    /// Base URL the service is reachable at on the local machine.
    pub fn default_url(self) -> String {
        format!("http://localhost:{}", self.default_port())
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Listening port; falls back to the instance default when unset or empty.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub port: Option<u16>,
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.port == Some(0) {
            return Err(ServiceError::InvalidConfig(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective listening port for the given instance.
    pub fn port_for(&self, instance: Instance) -> u16 {
        self.port.unwrap_or_else(|| instance.default_port())
    }
}
