//! Build configuration file
//!
//! Describes the repository setup of a build step in `antmvn.yaml`:
//!
//! ```yaml
//! settings: ci/settings.yaml
//! localRepository: target/m2
//! references:
//!   - name: corporate
//!     id: corp
//!     url: https://nexus.corp/maven
//! repositories:
//!   - refid: corporate
//!   - id: snapshots
//!     url: https://nexus.corp/snapshots
//!     releases:
//!       enabled: false
//! project:
//!   repositories:
//!     - id: jboss
//!       url: https://repository.jboss.org/nexus/content/groups/public
//! ```
//!
//! Relative paths are resolved against the directory of the file.

use antmvn_core::{LocalRepository, ProjectRepository, RemoteRepositoryConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RepoError, Result};
use crate::registry::RepositoryRegistry;

/// File name looked up in the working directory
pub const DEFAULT_BUILD_FILE: &str = "antmvn.yaml";

/// A named repository definition that other entries can reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRepository {
    pub name: String,

    #[serde(flatten)]
    pub repository: RemoteRepositoryConfig,
}

/// Repositories declared by the project definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDefinition {
    #[serde(default)]
    pub repositories: Vec<ProjectRepository>,
}

/// Build configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// User settings file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<PathBuf>,

    /// Global settings file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_settings: Option<PathBuf>,

    /// Local repository overriding the settings one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,

    #[serde(default)]
    pub references: Vec<NamedRepository>,

    /// Repositories configured on the task
    #[serde(default)]
    pub repositories: Vec<RemoteRepositoryConfig>,

    #[serde(default)]
    pub project: ProjectDefinition,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl BuildConfig {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// `antmvn.yaml` in the working directory
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_BUILD_FILE)
    }

    /// Register the named definitions in file order
    pub fn registry(&self) -> Result<RepositoryRegistry> {
        let mut registry = RepositoryRegistry::new();
        for named in &self.references {
            if named.name.trim().is_empty() {
                return Err(RepoError::MissingAttribute {
                    element: "repository reference".to_string(),
                    attribute: "name".to_string(),
                });
            }
            registry.register(named.name.clone(), named.repository.clone())?;
        }
        Ok(registry)
    }

    /// Project repositories in collector form
    pub fn declared(&self) -> Vec<RemoteRepositoryConfig> {
        self.project
            .repositories
            .iter()
            .cloned()
            .map(RemoteRepositoryConfig::from)
            .collect()
    }

    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings.as_deref().map(|p| self.resolve_path(p))
    }

    pub fn global_settings_path(&self) -> Option<PathBuf> {
        self.global_settings.as_deref().map(|p| self.resolve_path(p))
    }

    pub fn local_repository(&self) -> Option<LocalRepository> {
        self.local_repository
            .as_deref()
            .map(|p| LocalRepository::new(self.resolve_path(p)))
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BUILD_FILE: &str = r#"
settings: ci/settings.yaml
localRepository: /var/m2
references:
  - name: corporate
    id: corp
    url: https://nexus.corp/maven
  - name: company
    refid: corporate
repositories:
  - refid: company
  - id: snapshots
    url: https://nexus.corp/snapshots
    releases:
      enabled: false
project:
  repositories:
    - id: jboss
      name: JBoss
      url: https://repository.jboss.org/nexus/content/groups/public
"#;

    fn load(content: &str) -> (TempDir, BuildConfig) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_BUILD_FILE);
        std::fs::write(&path, content).unwrap();
        let config = BuildConfig::load_from(&path).unwrap();
        (dir, config)
    }

    #[test]
    fn test_load_build_file() {
        let (dir, config) = load(BUILD_FILE);

        assert_eq!(config.repositories.len(), 2);
        assert_eq!(config.repositories[0].refid.as_deref(), Some("company"));
        assert!(!config.repositories[1].releases.as_ref().unwrap().enabled);
        assert_eq!(
            config.settings_path().unwrap(),
            dir.path().join("ci").join("settings.yaml")
        );
        assert!(config.global_settings_path().is_none());
        assert_eq!(
            config.local_repository().unwrap().path(),
            Path::new("/var/m2")
        );
    }

    #[test]
    fn test_registry_from_references() {
        let (_dir, config) = load(BUILD_FILE);
        let registry = config.registry().unwrap();

        assert_eq!(registry.get("company").unwrap().url, "https://nexus.corp/maven");
        assert_eq!(registry.get("company").unwrap().id.as_deref(), Some("corp"));
    }

    #[test]
    fn test_declared_repositories() {
        let (_dir, config) = load(BUILD_FILE);
        let declared = config.declared();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].id.as_deref(), Some("jboss"));
    }

    #[test]
    fn test_reference_without_name() {
        let (_dir, config) = load("references:\n  - name: ''\n    url: http://x\n");
        assert!(matches!(
            config.registry(),
            Err(RepoError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_empty_build_file() {
        let (_dir, config) = load("{}\n");
        assert!(config.repositories.is_empty());
        assert!(config.declared().is_empty());
        assert!(config.local_repository().is_none());
    }
}
