//! Repos command - resolve the remote repositories of a build

use antmvn_core::Settings;
use antmvn_repo::{BuildConfig, RepositoryCollector, RepositorySession};
use std::path::Path;

use crate::display;
use crate::error::{CliError, Result};

pub fn run(
    build: Option<&Path>,
    settings: Option<&Path>,
    global_settings: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = load_build_config(build)?;

    let user_path = settings.map(Path::to_path_buf).or_else(|| config.settings_path());
    let global_path = global_settings
        .map(Path::to_path_buf)
        .or_else(|| config.global_settings_path());
    let settings = Settings::discover(user_path.as_deref(), global_path.as_deref());

    let registry = config.registry()?;
    let collector = RepositoryCollector::new(&settings).with_registry(&registry);
    let session = RepositorySession::prepare(
        &collector,
        &config.repositories,
        &config.declared(),
        config.local_repository(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        display::print_session(&session);
    }
    Ok(())
}

/// An explicit build file must exist; the default one is optional
fn load_build_config(build: Option<&Path>) -> Result<BuildConfig> {
    match build {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::Io {
                    message: format!("Build file not found: {}", path.display()),
                });
            }
            Ok(BuildConfig::load_from(path)?)
        }
        None => {
            let path = BuildConfig::default_path();
            if path.exists() {
                Ok(BuildConfig::load_from(&path)?)
            } else {
                Ok(BuildConfig::default())
            }
        }
    }
}
