//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Settings file not found: {path}")]
    SettingsNotFound { path: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid update policy '{value}': expected always, daily, never or interval:<minutes>")]
    InvalidUpdatePolicy { value: String },

    #[error("Invalid checksum policy '{value}': expected fail, warn or ignore")]
    InvalidChecksumPolicy { value: String },

    #[error("Could not determine home directory")]
    NoHomeDirectory,
}

pub type Result<T> = std::result::Result<T, CoreError>;
