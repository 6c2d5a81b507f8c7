//! The repository form handed to the resolution engine

use antmvn_core::{Authentication, EffectivePolicy, Proxy, RemoteRepositoryConfig};
use serde::Serialize;
use std::fmt;

/// Identity a repository had before a mirror replaced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirroredFrom {
    pub id: String,
    pub url: String,
}

/// A remote repository after collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRepository {
    pub id: String,
    pub url: String,
    pub layout: String,
    pub releases: EffectivePolicy,
    pub snapshots: EffectivePolicy,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<Proxy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirrored_from: Option<MirroredFrom>,
}

impl ResolvedRepository {
    /// Build from a configured entry whose id has already been settled
    pub(crate) fn from_config(id: String, config: RemoteRepositoryConfig) -> Self {
        Self {
            id,
            releases: EffectivePolicy::from_config(config.releases.as_ref()),
            snapshots: EffectivePolicy::from_config(config.snapshots.as_ref()),
            url: config.url,
            layout: config.layout,
            authentication: config.authentication,
            proxy: config.proxy,
            mirrored_from: None,
        }
    }

    /// Username of the attached authentication, if any
    pub fn principal(&self) -> Option<&str> {
        self.authentication.as_ref()?.username.as_deref()
    }

    /// Host of the attached proxy, if any
    pub fn proxy_host(&self) -> Option<&str> {
        self.proxy.as_ref().map(|p| p.host.as_str())
    }
}

impl fmt::Display for ResolvedRepository {
    /// `id=..., url=..., releases=..., snapshots=...[, authentication=...][, proxy=...]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, url={}, releases={}, snapshots={}",
            self.id,
            self.url,
            self.releases.status(),
            self.snapshots.status()
        )?;
        if let Some(user) = self.principal() {
            write!(f, ", authentication={}", user)?;
        }
        if let Some(host) = self.proxy_host() {
            write!(f, ", proxy={}", host)?;
        }
        Ok(())
    }
}
