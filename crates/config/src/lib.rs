// Configuration loading

pub mod settings;

pub use settings::{ColorMode, ConfigError, Settings};
