//! antmvn Core - Repository types shared by the antmvn crates
//!
//! This crate provides the foundational types used throughout antmvn:
//! - `RemoteRepositoryConfig`: a remote repository as configured for a build step
//! - `RepositoryPolicy`: release/snapshot channel policy
//! - `ProjectRepository`: a repository declared by a project definition
//! - `LocalRepository`: the local artifact cache
//! - `Settings`: mirrors, stored server credentials and proxies

pub mod error;
pub mod policy;
pub mod repository;
pub mod settings;

pub use error::{CoreError, Result};
pub use policy::{ChecksumPolicy, EffectivePolicy, RepositoryPolicy, UpdatePolicy};
pub use repository::{
    Authentication, DEFAULT_LAYOUT, KNOWN_LAYOUTS, LocalRepository, ProjectRepository, Proxy,
    RemoteRepositoryConfig,
};
pub use settings::{
    DEFAULT_PROXY_ID, Mirror, Server, Settings, SettingsProxy, default_local_repository_path,
};
