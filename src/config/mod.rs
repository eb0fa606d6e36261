pub mod env;
mod loader;

pub use env::{AppConfig, CorsConfig, DirectoryConfig, LogFormat, LogRotation, LoggingConfig};
pub use loader::load_config;
