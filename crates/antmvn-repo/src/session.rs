//! Everything a resolution engine needs to know about repositories for one
//! build step

use antmvn_core::{LocalRepository, RemoteRepositoryConfig};
use serde::Serialize;

use crate::collector::RepositoryCollector;
use crate::error::Result;
use crate::resolved::ResolvedRepository;

#[derive(Debug, Clone, Serialize)]
pub struct RepositorySession {
    pub local: LocalRepository,
    pub remotes: Vec<ResolvedRepository>,
    pub offline: bool,
}

impl RepositorySession {
    /// Collect remotes and settle the local repository.
    ///
    /// An explicitly configured local repository wins over the settings one.
    pub fn prepare(
        collector: &RepositoryCollector<'_>,
        configured: &[RemoteRepositoryConfig],
        declared: &[RemoteRepositoryConfig],
        local: Option<LocalRepository>,
    ) -> Result<Self> {
        let settings = collector.settings();
        let local = match local {
            Some(local) => local,
            None => settings.local_repository()?,
        };

        if settings.offline {
            tracing::info!("You are working in offline mode.");
        }

        let remotes = collector.collect(configured, declared)?;
        Ok(Self {
            local,
            remotes,
            offline: settings.offline,
        })
    }

    /// Remote repository by id
    pub fn remote(&self, id: &str) -> Option<&ResolvedRepository> {
        self.remotes.iter().find(|r| r.id == id)
    }
}
