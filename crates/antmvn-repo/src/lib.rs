//! antmvn Repository Collection
//!
//! This crate decides which remote repositories a build step consults:
//!
//! - **Collection**: configured, then project-declared repositories, with the
//!   default repository as fallback; first definition of an id wins
//! - **Mirrors**: `mirrorOf` patterns (`*`, `external:*`, `id`, `!id`) replace
//!   a repository's id and URL
//! - **Credentials**: stored server entries and the active proxy are attached
//!   to repositories that do not set their own
//! - **Default ids**: repositories without an id get the MD5 digest of their URL
//!
//! ## Example
//!
//! ```rust
//! use antmvn_core::{Mirror, RemoteRepositoryConfig, Settings};
//! use antmvn_repo::RepositoryCollector;
//!
//! let settings = Settings {
//!     mirrors: vec![Mirror::new("corp", "https://nexus.corp/maven", "external:*")],
//!     ..Settings::default()
//! };
//!
//! let configured = vec![RemoteRepositoryConfig::new("central", "https://repo1.maven.org/maven2")];
//! let repositories = RepositoryCollector::new(&settings).collect(&configured, &[])?;
//!
//! assert_eq!(repositories[0].id, "corp");
//! # Ok::<(), antmvn_repo::RepoError>(())
//! ```

pub mod error;
pub mod id;
pub mod mirror;
pub mod resolved;
pub mod credentials;
pub mod registry;
pub mod collector;
pub mod session;
pub mod config;

// Re-exports for convenience
pub use error::{RepoError, Result};
pub use id::{FALLBACK_ID, IdGenerator, Md5IdGenerator};
pub use mirror::{find_mirror, is_external, matches_pattern};
pub use resolved::{MirroredFrom, ResolvedRepository};
pub use credentials::{CredentialResolver, DecryptError, Decryptor, PlaintextDecryptor};
pub use registry::RepositoryRegistry;
pub use collector::{
    DEFAULT_REPOSITORY_ID, DEFAULT_REPOSITORY_URL, RepositoryCollector, default_remote_repository,
};
pub use session::RepositorySession;
pub use config::{BuildConfig, NamedRepository, ProjectDefinition};
