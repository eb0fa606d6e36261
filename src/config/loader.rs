use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use super::env::{
    AppConfig, ConfigError, CorsConfig, DirectoryConfig, LogFormat, LogRotation, LoggingConfig,
    ModelConfig, ServerConfig,
};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL_PATH: &str = "phishing_model.json";

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_env()
}

impl AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = parse_env("HOST", IpAddr::from([0, 0, 0, 0]), |v| v.parse().ok())?;
        let port = parse_env("PORT", DEFAULT_PORT, |v| v.parse().ok())?;

        let server = ServerConfig {
            bind_addr: SocketAddr::new(host, port),
            shutdown_timeout: Duration::from_secs(parse_env("SHUTDOWN_TIMEOUT_SECS", 5, |v| {
                v.parse::<u64>().ok()
            })?),
        };

        let model = ModelConfig {
            path: match env::var("MODEL_PATH") {
                Ok(value) if value.trim().is_empty() => None,
                Ok(value) => Some(PathBuf::from(value.trim())),
                Err(_) => Some(PathBuf::from(DEFAULT_MODEL_PATH)),
            },
        };

        let directories = DirectoryConfig {
            logs_dir: env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: parse_env("LOG_FORMAT", LogFormat::Text, parse_log_format)?,
            file_prefix: env::var("LOG_FILE_PREFIX")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "phish-guard".to_string()),
            rotation: parse_env("LOG_ROTATION", LogRotation::Daily, parse_log_rotation)?,
        };

        let cors = CorsConfig {
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|value| parse_list(&value))
                .unwrap_or_default(),
        };

        Ok(Self {
            server,
            model,
            directories,
            logging,
            cors,
        })
    }
}

/// Unset keys take `default`; set but unparsable keys are an error.
fn parse_env<T>(
    key: &'static str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => parse(value.trim()).ok_or(ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

fn parse_log_format(value: &str) -> Option<LogFormat> {
    match value.to_ascii_lowercase().as_str() {
        "text" | "pretty" => Some(LogFormat::Text),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

fn parse_log_rotation(value: &str) -> Option<LogRotation> {
    match value.to_ascii_lowercase().as_str() {
        "hourly" => Some(LogRotation::Hourly),
        "daily" => Some(LogRotation::Daily),
        "never" => Some(LogRotation::Never),
        _ => None,
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
