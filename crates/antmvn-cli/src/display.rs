//! Display formatting for CLI output

use antmvn_repo::{RepositorySession, ResolvedRepository};
use console::style;

/// Print the local repository and the resolved remotes as a table
pub fn print_session(session: &RepositorySession) {
    println!(
        "{} {} ({})",
        style("Local repository:").bold(),
        session.local.path().display(),
        session.local.layout
    );
    if session.offline {
        println!("{}", style("Offline mode: remote repositories will not be contacted").yellow());
    }
    println!();

    println!(
        "{:<24} {:<9} {:<9} {:<14} {:<18} {}",
        "ID", "RELEASES", "SNAPSHOTS", "AUTH", "PROXY", "URL"
    );
    println!("{}", "-".repeat(100));

    for repo in &session.remotes {
        print_repository(repo);
    }
}

fn print_repository(repo: &ResolvedRepository) {
    println!(
        "{:<24} {:<9} {:<9} {:<14} {:<18} {}",
        repo.id,
        repo.releases.status(),
        repo.snapshots.status(),
        repo.principal().unwrap_or("-"),
        repo.proxy_host().unwrap_or("-"),
        repo.url
    );
    if let Some(original) = &repo.mirrored_from {
        println!(
            "  {} mirror of {} ({})",
            style("↳").dim(),
            original.id,
            original.url
        );
    }
}
