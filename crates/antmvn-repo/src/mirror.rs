//! Mirror selection
//!
//! A mirror's `mirrorOf` is a comma-separated list of terms:
//!
//! - `*` matches every repository
//! - `external:*` matches repositories not on localhost and not file based
//! - `repo` matches the repository with id `repo`
//! - `!repo` excludes `repo`, even if an earlier term matched it
//!
//! An exact `mirrorOf == id` match always beats a pattern match.

use antmvn_core::Mirror;
use url::Url;

const WILDCARD: &str = "*";
const EXTERNAL_WILDCARD: &str = "external:*";

/// Find the mirror serving a repository, if any.
///
/// Mirrors are tried in configured order, first for an exact id match, then
/// for a pattern match.
pub fn find_mirror<'a>(id: &str, url: &str, mirrors: &'a [Mirror]) -> Option<&'a Mirror> {
    mirrors
        .iter()
        .find(|m| m.mirror_of == id)
        .or_else(|| mirrors.iter().find(|m| matches_pattern(id, url, &m.mirror_of)))
}

/// Check whether a `mirrorOf` pattern covers the repository
pub fn matches_pattern(id: &str, url: &str, pattern: &str) -> bool {
    if pattern == WILDCARD || pattern == id {
        return true;
    }

    let mut matched = false;
    for term in pattern.split(',').map(str::trim) {
        if let Some(excluded) = term.strip_prefix('!').filter(|name| !name.is_empty()) {
            if excluded == id {
                return false;
            }
        } else if term == id || term == WILDCARD {
            matched = true;
        } else if term == EXTERNAL_WILDCARD && is_external(url) {
            matched = true;
        }
    }
    matched
}

/// A repository is external unless it lives on localhost or is file based.
///
/// URLs that do not parse are never external.
pub fn is_external(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if parsed.scheme() == "file" {
        return false;
    }
    !matches!(parsed.host_str(), Some("localhost") | Some("127.0.0.1"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTRAL_URL: &str = "https://repo1.maven.org/maven2";

    #[test]
    fn test_wildcard_matches_everything() {
        assert!(matches_pattern("central", CENTRAL_URL, "*"));
        assert!(matches_pattern("anything", "file:///tmp/repo", "*"));
    }

    #[test]
    fn test_single_id() {
        assert!(matches_pattern("central", CENTRAL_URL, "central"));
        assert!(!matches_pattern("snapshots", CENTRAL_URL, "central"));
    }

    #[test]
    fn test_id_list() {
        let pattern = "central,apache.snapshots";
        assert!(matches_pattern("central", CENTRAL_URL, pattern));
        assert!(matches_pattern("apache.snapshots", CENTRAL_URL, pattern));
        assert!(!matches_pattern("jboss", CENTRAL_URL, pattern));
    }

    #[test]
    fn test_exclusion() {
        let pattern = "*,!central";
        assert!(!matches_pattern("central", CENTRAL_URL, pattern));
        assert!(matches_pattern("jboss", CENTRAL_URL, pattern));
        assert!(matches_pattern("internal", "http://localhost/repo", pattern));
    }

    #[test]
    fn test_exclusion_wins_over_earlier_id() {
        assert!(!matches_pattern("central", CENTRAL_URL, "central,!central"));
    }

    #[test]
    fn test_terms_are_trimmed() {
        assert!(!matches_pattern("central", CENTRAL_URL, "*, !central"));
        assert!(matches_pattern("jboss", CENTRAL_URL, "central , jboss"));
    }

    #[test]
    fn test_bare_bang_is_not_an_exclusion() {
        assert!(!matches_pattern("central", CENTRAL_URL, "!"));
    }

    #[test]
    fn test_external() {
        assert!(is_external("http://example.org/repo"));
        assert!(is_external(CENTRAL_URL));
        assert!(!is_external("file:///home/x"));
        assert!(!is_external("http://localhost/repo"));
        assert!(!is_external("http://127.0.0.1:8081/repo"));
        assert!(!is_external("not a url"));
    }

    #[test]
    fn test_external_pattern() {
        let pattern = "external:*";
        assert!(matches_pattern("central", "http://example.org/repo", pattern));
        assert!(!matches_pattern("local-nexus", "http://localhost:8081/nexus", pattern));
        assert!(!matches_pattern("fs", "file:///home/x", pattern));

        let except = "external:*,!central";
        assert!(!matches_pattern("central", CENTRAL_URL, except));
        assert!(matches_pattern("jboss", "https://repository.jboss.org", except));
    }

    #[test]
    fn test_exact_match_beats_earlier_pattern() {
        let mirrors = vec![
            Mirror::new("everything", "http://all.mirror", "*"),
            Mirror::new("central-mirror", "http://central.mirror", "central"),
        ];

        let found = find_mirror("central", CENTRAL_URL, &mirrors).unwrap();
        assert_eq!(found.id, "central-mirror");

        let other = find_mirror("jboss", "https://repository.jboss.org", &mirrors).unwrap();
        assert_eq!(other.id, "everything");
    }

    #[test]
    fn test_patterns_in_order() {
        let mirrors = vec![
            Mirror::new("first", "http://first", "external:*,!central"),
            Mirror::new("second", "http://second", "*"),
        ];

        assert_eq!(find_mirror("central", CENTRAL_URL, &mirrors).unwrap().id, "second");
        assert_eq!(
            find_mirror("jboss", "https://repository.jboss.org", &mirrors)
                .unwrap()
                .id,
            "first"
        );
    }

    #[test]
    fn test_no_mirror() {
        let mirrors = vec![Mirror::new("m", "http://m", "central")];
        assert!(find_mirror("jboss", "https://repository.jboss.org", &mirrors).is_none());
        assert!(find_mirror("central", CENTRAL_URL, &[]).is_none());
    }

    #[test]
    fn test_pure() {
        let mirrors = vec![Mirror::new("m1", "http://mirror", "external:*")];
        let first = find_mirror("central", "http://repo1.example.org/m2", &mirrors);
        let second = find_mirror("central", "http://repo1.example.org/m2", &mirrors);
        assert_eq!(first, second);
        assert_eq!(first.unwrap().id, "m1");
    }
}
