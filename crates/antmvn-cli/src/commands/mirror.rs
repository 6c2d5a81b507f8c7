//! Mirror command - show which mirror serves a repository

use antmvn_core::Settings;
use antmvn_repo::find_mirror;
use console::style;
use std::path::Path;

use crate::error::Result;
use crate::exit_codes;

pub fn run(
    id: &str,
    url: &str,
    settings: Option<&Path>,
    global_settings: Option<&Path>,
) -> Result<()> {
    let settings = Settings::discover(settings, global_settings);

    match find_mirror(id, url, &settings.mirrors) {
        Some(mirror) => {
            println!(
                "{} {} is mirrored by {}",
                style("→").blue(),
                style(id).bold(),
                style(&mirror.id).green()
            );
            println!("  url:      {}", mirror.url);
            println!("  mirrorOf: {}", mirror.mirror_of);
            Ok(())
        }
        None => {
            println!("{} No mirror for {}", style("✗").yellow(), style(id).bold());
            std::process::exit(exit_codes::NO_MATCH);
        }
    }
}
