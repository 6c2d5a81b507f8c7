//! Error types for repository collection

use thiserror::Error;

/// Repository collection errors
///
/// A configuration error stops collection; no partial repository list is
/// returned.
#[derive(Debug, Error)]
pub enum RepoError {
    // ============ Configuration Errors ============
    #[error("Each remote repository must specify a url (repository #{}{})", .position, describe_id(.id))]
    EmptyUrl { position: usize, id: Option<String> },

    #[error("Repository reference '{refid}' does not name a registered repository")]
    UnresolvedReference { refid: String },

    #[error("Unknown layout '{layout}' for repository {id}: expected one of {known}")]
    UnknownLayout {
        id: String,
        layout: String,
        known: String,
    },

    #[error("Missing required attribute '{attribute}' on {element}")]
    MissingAttribute { element: String, attribute: String },

    // ============ IO Errors ============
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Core(#[from] antmvn_core::CoreError),
}

fn describe_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(", id '{}'", id),
        None => String::new(),
    }
}

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, RepoError>;

impl From<serde_yaml::Error> for RepoError {
    fn from(e: serde_yaml::Error) -> Self {
        RepoError::Serialization(e.to_string())
    }
}
