//! User and global settings
//!
//! A read-only snapshot of mirrors, stored server credentials, proxies and the
//! local repository location. Settings are looked up in, by priority:
//!
//! - user: `~/.ant/settings.yaml`, then `~/.m2/settings.yaml`
//! - global: `$ANT_HOME/etc/settings.yaml`, then `$M2_HOME/conf/settings.yaml`
//!
//! User settings dominate global ones when both exist.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};
use crate::repository::{LocalRepository, Proxy};

/// A mirror replacing one or more repositories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mirror {
    /// Id the mirrored repositories take on
    pub id: String,

    /// Replacement URL
    pub url: String,

    /// Pattern of repository ids this mirror serves
    pub mirror_of: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Mirror {
    pub fn new(id: impl Into<String>, url: impl Into<String>, mirror_of: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            mirror_of: mirror_of.into(),
            name: None,
        }
    }
}

/// Stored credentials for a repository id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Possibly encrypted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

/// A proxy declared in settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsProxy {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(flatten)]
    pub proxy: Proxy,
}

fn default_active() -> bool {
    true
}

/// Id of a settings proxy that does not declare one
pub const DEFAULT_PROXY_ID: &str = "default";

impl SettingsProxy {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(DEFAULT_PROXY_ID)
    }
}

/// Settings snapshot for one build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_repository: Option<PathBuf>,

    #[serde(default)]
    pub offline: bool,

    #[serde(default)]
    pub mirrors: Vec<Mirror>,

    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub proxies: Vec<SettingsProxy>,
}

impl Settings {
    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::SettingsNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings, logging and ignoring a file that cannot be read or parsed
    pub fn load_lenient(path: &Path) -> Self {
        tracing::debug!("Loading settings file: {}", path.display());
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    "Error reading settings file '{}' - ignoring. Error was: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Locate, load and merge user and global settings.
    ///
    /// Explicit paths take precedence over the default lookup locations.
    pub fn discover(user: Option<&Path>, global: Option<&Path>) -> Self {
        let user_path = user.map(Path::to_path_buf).or_else(default_user_settings_path);
        let global_path = global
            .map(Path::to_path_buf)
            .or_else(default_global_settings_path);

        let user_settings = user_path
            .as_deref()
            .map(Self::load_lenient)
            .unwrap_or_default();
        let global_settings = global_path
            .as_deref()
            .map(Self::load_lenient)
            .unwrap_or_default();

        user_settings.merge(global_settings)
    }

    /// Merge `recessive` into `self`; entries of `self` win on id clashes.
    ///
    /// `offline` is not merged: only the dominant settings decide it.
    pub fn merge(mut self, recessive: Settings) -> Self {
        if self.local_repository.is_none() {
            self.local_repository = recessive.local_repository;
        }

        for mirror in recessive.mirrors {
            if !self.mirrors.iter().any(|m| m.id == mirror.id) {
                self.mirrors.push(mirror);
            }
        }
        for server in recessive.servers {
            if self.server(&server.id).is_none() {
                self.servers.push(server);
            }
        }
        for proxy in recessive.proxies {
            if !self.proxies.iter().any(|p| p.id() == proxy.id()) {
                self.proxies.push(proxy);
            }
        }
        self
    }

    /// Stored credentials for a repository id
    pub fn server(&self, id: &str) -> Option<&Server> {
        self.servers.iter().find(|s| s.id == id)
    }

    /// The first active proxy; only one proxy is in effect at a time
    pub fn active_proxy(&self) -> Option<&Proxy> {
        self.proxies.iter().find(|p| p.active).map(|p| &p.proxy)
    }

    /// Local repository location, falling back to `~/.m2/repository`
    pub fn local_repository(&self) -> Result<LocalRepository> {
        let path = match &self.local_repository {
            Some(path) => path.clone(),
            None => default_local_repository_path()?,
        };
        Ok(LocalRepository::new(path))
    }
}

/// `~/.m2/repository`
pub fn default_local_repository_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(CoreError::NoHomeDirectory)?;
    Ok(home.join(".m2").join("repository"))
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|p| p.exists())
}

fn default_user_settings_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    first_existing([
        home.join(".ant").join("settings.yaml"),
        home.join(".m2").join("settings.yaml"),
    ])
}

fn default_global_settings_path() -> Option<PathBuf> {
    let candidates = [("ANT_HOME", "etc"), ("M2_HOME", "conf")]
        .into_iter()
        .filter_map(|(var, dir)| {
            std::env::var_os(var).map(|home| PathBuf::from(home).join(dir).join("settings.yaml"))
        });
    first_existing(candidates)
}
