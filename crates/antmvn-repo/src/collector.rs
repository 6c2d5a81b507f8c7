//! Remote repository collection
//!
//! Builds the ordered list of remote repositories a build step will consult:
//!
//! 1. repositories configured on the task, in order
//! 2. repositories declared by the project, in order
//! 3. the default repository, only when both lists are empty
//!
//! The first repository registered under an id wins; later ones with the same
//! id are dropped. Survivors are then passed through the mirror settings and
//! get stored credentials and the active proxy attached.
//!
//! Any configuration error (missing url, unresolved `refid`, unknown layout)
//! fails the whole collection.

use antmvn_core::{
    DEFAULT_LAYOUT, KNOWN_LAYOUTS, RemoteRepositoryConfig, RepositoryPolicy, Settings,
};
use std::collections::HashSet;

use crate::credentials::{CredentialResolver, Decryptor, PlaintextDecryptor};
use crate::error::{RepoError, Result};
use crate::id::{self, IdGenerator, Md5IdGenerator};
use crate::mirror::find_mirror;
use crate::registry::RepositoryRegistry;
use crate::resolved::{MirroredFrom, ResolvedRepository};

/// Id of the repository used when nothing else is configured
pub const DEFAULT_REPOSITORY_ID: &str = "central";

/// URL of the repository used when nothing else is configured
pub const DEFAULT_REPOSITORY_URL: &str = "https://repo1.maven.org/maven2";

/// The fallback repository: releases enabled, snapshots disabled
pub fn default_remote_repository() -> RemoteRepositoryConfig {
    RemoteRepositoryConfig::new(DEFAULT_REPOSITORY_ID, DEFAULT_REPOSITORY_URL)
        .with_snapshots(RepositoryPolicy::disabled())
}

/// Collects the remote repositories of one build step
pub struct RepositoryCollector<'a> {
    settings: &'a Settings,
    registry: Option<&'a RepositoryRegistry>,
    decryptor: &'a dyn Decryptor,
    id_generator: &'a dyn IdGenerator,
}

impl<'a> RepositoryCollector<'a> {
    /// Collector with no named definitions, plaintext passwords and MD5 ids
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            registry: None,
            decryptor: &PlaintextDecryptor,
            id_generator: &Md5IdGenerator,
        }
    }

    /// Resolve `refid` entries against these definitions
    pub fn with_registry(mut self, registry: &'a RepositoryRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_decryptor(mut self, decryptor: &'a dyn Decryptor) -> Self {
        self.decryptor = decryptor;
        self
    }

    pub fn with_id_generator(mut self, id_generator: &'a dyn IdGenerator) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn settings(&self) -> &'a Settings {
        self.settings
    }

    /// Produce the effective remote repository list.
    ///
    /// Either every entry is valid and the full list is returned, or the
    /// first invalid entry is reported and nothing is returned.
    pub fn collect(
        &self,
        configured: &[RemoteRepositoryConfig],
        declared: &[RemoteRepositoryConfig],
    ) -> Result<Vec<ResolvedRepository>> {
        let mut combined: Vec<RemoteRepositoryConfig> =
            configured.iter().chain(declared).cloned().collect();
        if combined.is_empty() {
            combined.push(default_remote_repository());
        }

        let prepared = combined
            .into_iter()
            .enumerate()
            .map(|(index, config)| self.prepare(index + 1, config))
            .collect::<Result<Vec<_>>>()?;

        let mut accepted = HashSet::new();
        let mirrored: Vec<ResolvedRepository> = prepared
            .into_iter()
            .filter(|(id, config)| {
                let first = accepted.insert(id.clone());
                if !first {
                    tracing::debug!("Skipping duplicate repository id={}, url={}", id, config.url);
                }
                first
            })
            .map(|(id, config)| self.apply_mirror(ResolvedRepository::from_config(id, config)))
            .collect();

        // Several repositories may have collapsed into the same mirror
        let mut emitted = HashSet::new();
        let resolver = CredentialResolver::new(self.settings, self.decryptor);
        let repositories: Vec<ResolvedRepository> = mirrored
            .into_iter()
            .filter(|repo| {
                let first = emitted.insert(repo.id.clone());
                if !first {
                    tracing::debug!("Repository already served by mirror {}", repo.id);
                }
                first
            })
            .map(|repo| resolver.attach(repo))
            .collect();

        for repo in &repositories {
            tracing::info!("Using remote repository: {}", repo);
        }
        Ok(repositories)
    }

    /// Resolve the reference, validate, and settle the id of one entry
    fn prepare(
        &self,
        position: usize,
        config: RemoteRepositoryConfig,
    ) -> Result<(String, RemoteRepositoryConfig)> {
        let mut config = match (config.refid.clone(), self.registry) {
            (None, _) => config,
            (Some(_), Some(registry)) => registry.resolve(config)?,
            (Some(refid), None) => return Err(RepoError::UnresolvedReference { refid }),
        };

        if config.url.trim().is_empty() {
            return Err(RepoError::EmptyUrl {
                position,
                id: config.id.clone(),
            });
        }

        let id = match config.explicit_id() {
            Some(id) => id.to_string(),
            None => {
                tracing::warn!(
                    "Each remote repository should specify a unique id (url {})",
                    config.url
                );
                id::generate_or_fallback(self.id_generator, &config.url)
            }
        };

        let layout = config.layout.trim();
        config.layout = if layout.is_empty() {
            DEFAULT_LAYOUT.to_string()
        } else {
            layout.to_string()
        };
        if !KNOWN_LAYOUTS.contains(&config.layout.as_str()) {
            return Err(RepoError::UnknownLayout {
                id,
                layout: config.layout,
                known: KNOWN_LAYOUTS.join(", "),
            });
        }

        config.id = Some(id.clone());
        Ok((id, config))
    }

    /// Replace the repository's identity by its mirror's, if one applies
    fn apply_mirror(&self, mut repo: ResolvedRepository) -> ResolvedRepository {
        if let Some(mirror) = find_mirror(&repo.id, &repo.url, &self.settings.mirrors) {
            tracing::debug!(
                "Repository {} ({}) is mirrored by {} ({})",
                repo.id,
                repo.url,
                mirror.id,
                mirror.url
            );
            repo.mirrored_from = Some(MirroredFrom {
                id: std::mem::replace(&mut repo.id, mirror.id.clone()),
                url: std::mem::replace(&mut repo.url, mirror.url.clone()),
            });
        }
        repo
    }
}
