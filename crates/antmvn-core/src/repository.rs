//! Repository definitions as they come out of build configuration
//!
//! - `RemoteRepositoryConfig`: a remote repository configured on a task or
//!   declared by a project, before collection
//! - `ProjectRepository`: a repository block of a parsed project definition
//! - `LocalRepository`: the on-disk artifact cache

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::policy::RepositoryPolicy;

/// Layout used when none is configured
pub const DEFAULT_LAYOUT: &str = "default";

/// Layouts a resolution engine knows how to address
pub const KNOWN_LAYOUTS: &[&str] = &["default", "legacy"];

fn default_layout() -> String {
    DEFAULT_LAYOUT.to_string()
}

fn is_default_layout(layout: &String) -> bool {
    layout == DEFAULT_LAYOUT
}

/// Credentials used to talk to a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Never written out
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    #[serde(default, skip_serializing)]
    pub passphrase: Option<String>,
}

impl Authentication {
    /// Username/password authentication
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }
}

fn default_proxy_protocol() -> String {
    "http".to_string()
}

fn default_proxy_port() -> u16 {
    8080
}

/// Proxy used to reach a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    #[serde(rename = "type", alias = "protocol", default = "default_proxy_protocol")]
    pub protocol: String,

    pub host: String,

    #[serde(default = "default_proxy_port")]
    pub port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// `|`-separated host patterns that bypass the proxy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_proxy_hosts: Option<String>,
}

impl Proxy {
    /// HTTP proxy without credentials
    pub fn http(host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol: default_proxy_protocol(),
            host: host.into(),
            port,
            username: None,
            password: None,
            non_proxy_hosts: None,
        }
    }
}

/// A remote repository before collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRepositoryConfig {
    /// Repository id, generated from the URL when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub url: String,

    #[serde(default = "default_layout", skip_serializing_if = "is_default_layout")]
    pub layout: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub releases: Option<RepositoryPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<RepositoryPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,

    /// Name of a registered definition this entry stands for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refid: Option<String>,
}

impl RemoteRepositoryConfig {
    /// Repository with an explicit id
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::without_id(url)
        }
    }

    /// Repository whose id will be generated from its URL
    pub fn without_id(url: impl Into<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            layout: default_layout(),
            releases: None,
            snapshots: None,
            authentication: None,
            proxy: None,
            refid: None,
        }
    }

    /// Entry standing for a registered definition
    pub fn reference(refid: impl Into<String>) -> Self {
        Self {
            refid: Some(refid.into()),
            ..Self::without_id("")
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_releases(mut self, policy: RepositoryPolicy) -> Self {
        self.releases = Some(policy);
        self
    }

    pub fn with_snapshots(mut self, policy: RepositoryPolicy) -> Self {
        self.snapshots = Some(policy);
        self
    }

    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    pub fn with_proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// The configured id, if it is usable as one.
    ///
    /// A blank id, or an id that merely repeats the URL, does not count.
    /// Ids are used verbatim otherwise.
    pub fn explicit_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.trim().is_empty() && *id != self.url)
    }
}

/// A repository block of a parsed project definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRepository {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human readable name, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub url: String,

    #[serde(default = "default_layout")]
    pub layout: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub releases: Option<RepositoryPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshots: Option<RepositoryPolicy>,
}

impl From<ProjectRepository> for RemoteRepositoryConfig {
    fn from(repo: ProjectRepository) -> Self {
        Self {
            id: repo.id,
            url: repo.url,
            layout: repo.layout,
            releases: repo.releases,
            snapshots: repo.snapshots,
            authentication: None,
            proxy: None,
            refid: None,
        }
    }
}

/// The local artifact cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalRepository {
    pub path: PathBuf,

    #[serde(default = "default_layout")]
    pub layout: String,
}

impl LocalRepository {
    /// Id every local repository is known by
    pub const ID: &'static str = "local";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            layout: default_layout(),
        }
    }

    pub fn id(&self) -> &str {
        Self::ID
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `file://` URL of the repository root
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}
