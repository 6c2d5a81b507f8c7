//! Named repository definitions
//!
//! A build can define a repository once under a name and refer to it from
//! several tasks with `refid`. References must point at a definition that was
//! registered earlier.

use antmvn_core::RemoteRepositoryConfig;
use std::collections::HashMap;

use crate::error::{RepoError, Result};

#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistry {
    definitions: HashMap<String, RemoteRepositoryConfig>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under `name`, replacing any previous one.
    ///
    /// A definition that is itself a reference is resolved now, so stored
    /// definitions never carry a `refid`.
    pub fn register(&mut self, name: impl Into<String>, config: RemoteRepositoryConfig) -> Result<()> {
        let resolved = self.resolve(config)?;
        self.definitions.insert(name.into(), resolved);
        Ok(())
    }

    /// Get a definition by name
    pub fn get(&self, name: &str) -> Option<&RemoteRepositoryConfig> {
        self.definitions.get(name)
    }

    /// Check if a definition exists
    pub fn has(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Replace a reference by the definition it names; other entries pass through
    pub fn resolve(&self, config: RemoteRepositoryConfig) -> Result<RemoteRepositoryConfig> {
        match config.refid.as_deref() {
            None => Ok(config),
            Some(refid) => self
                .get(refid)
                .cloned()
                .ok_or_else(|| RepoError::UnresolvedReference {
                    refid: refid.to_string(),
                }),
        }
    }
}
