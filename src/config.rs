
use {log::Level, serde::Deserialize, thiserror::Error};

/// The highest version of `zwlr_output_manager_v1` that is implemented.
pub const MAX_VERSION: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not parse the configuration")]
    Parse(#[source] serde_json::Error),
    #[error("Protocol version 0 does not exist")]
    ZeroVersion,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level(self) -> Level {
        match self {
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputManagerConfig {
    /// The version of `zwlr_output_manager_v1` advertised to clients.
    pub version: u32,
    pub log_level: LogLevel,
}

impl Default for OutputManagerConfig {
    fn default() -> Self {
        Self {
            version: MAX_VERSION,
            log_level: LogLevel::Info,
        }
    }
}

impl OutputManagerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        if config.version == 0 {
            return Err(ConfigError::ZeroVersion);
        }
        if config.version > MAX_VERSION {
            log::warn!(
                "Configured version {} is not supported, using version {}",
                config.version,
                MAX_VERSION,
            );
            config.version = MAX_VERSION;
        }
        Ok(config)
    }
}
