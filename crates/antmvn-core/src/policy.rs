//! Release and snapshot policies of a repository
//!
//! A repository carries one policy per channel. An absent policy means the
//! channel is enabled with the default update (`daily`) and checksum (`warn`)
//! behavior.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// How often remote metadata is re-checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UpdatePolicy {
    Always,
    #[default]
    Daily,
    Never,
    /// Re-check after the given number of minutes
    Interval(u32),
}

impl FromStr for UpdatePolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidUpdatePolicy {
            value: s.to_string(),
        };

        match s.trim() {
            "always" => Ok(UpdatePolicy::Always),
            "daily" => Ok(UpdatePolicy::Daily),
            "never" => Ok(UpdatePolicy::Never),
            other => {
                let minutes = other.strip_prefix("interval:").ok_or_else(invalid)?;
                minutes
                    .parse()
                    .map(UpdatePolicy::Interval)
                    .map_err(|_| invalid())
            }
        }
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdatePolicy::Always => write!(f, "always"),
            UpdatePolicy::Daily => write!(f, "daily"),
            UpdatePolicy::Never => write!(f, "never"),
            UpdatePolicy::Interval(minutes) => write!(f, "interval:{}", minutes),
        }
    }
}

impl TryFrom<String> for UpdatePolicy {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UpdatePolicy> for String {
    fn from(policy: UpdatePolicy) -> Self {
        policy.to_string()
    }
}

/// What to do when a downloaded checksum does not match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChecksumPolicy {
    Fail,
    #[default]
    Warn,
    Ignore,
}

impl FromStr for ChecksumPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fail" => Ok(ChecksumPolicy::Fail),
            "warn" => Ok(ChecksumPolicy::Warn),
            "ignore" => Ok(ChecksumPolicy::Ignore),
            _ => Err(CoreError::InvalidChecksumPolicy {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChecksumPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChecksumPolicy::Fail => "fail",
            ChecksumPolicy::Warn => "warn",
            ChecksumPolicy::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

impl TryFrom<String> for ChecksumPolicy {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChecksumPolicy> for String {
    fn from(policy: ChecksumPolicy) -> Self {
        policy.to_string()
    }
}

/// Policy for one channel (releases or snapshots) as configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPolicy {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_policy: Option<UpdatePolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum_policy: Option<ChecksumPolicy>,
}

fn default_enabled() -> bool {
    true
}

impl Default for RepositoryPolicy {
    fn default() -> Self {
        Self::enabled()
    }
}

impl RepositoryPolicy {
    /// An enabled channel with default update and checksum behavior
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            update_policy: None,
            checksum_policy: None,
        }
    }

    /// A disabled channel
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::enabled()
        }
    }
}

/// Normalized policy handed to the resolution engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePolicy {
    pub enabled: bool,
    pub update: UpdatePolicy,
    pub checksum: ChecksumPolicy,
}

impl EffectivePolicy {
    /// Normalize an optional configured policy. Absent means enabled.
    pub fn from_config(policy: Option<&RepositoryPolicy>) -> Self {
        match policy {
            None => Self {
                enabled: true,
                ..Self::default()
            },
            Some(p) => Self {
                enabled: p.enabled,
                update: p.update_policy.unwrap_or_default(),
                checksum: p.checksum_policy.unwrap_or_default(),
            },
        }
    }

    /// `enabled` or `disabled`, as shown in logs
    pub fn status(&self) -> &'static str {
        if self.enabled { "enabled" } else { "disabled" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_policy_parse() {
        assert_eq!("always".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::Always);
        assert_eq!("never".parse::<UpdatePolicy>().unwrap(), UpdatePolicy::Never);
        assert_eq!(
            "interval:30".parse::<UpdatePolicy>().unwrap(),
            UpdatePolicy::Interval(30)
        );
        assert!("interval:soon".parse::<UpdatePolicy>().is_err());
        assert!("hourly".parse::<UpdatePolicy>().is_err());
    }

    #[test]
    fn test_update_policy_display_matches_parse() {
        for policy in [
            UpdatePolicy::Always,
            UpdatePolicy::Daily,
            UpdatePolicy::Never,
            UpdatePolicy::Interval(90),
        ] {
            assert_eq!(policy.to_string().parse::<UpdatePolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn test_checksum_policy_parse() {
        assert_eq!("fail".parse::<ChecksumPolicy>().unwrap(), ChecksumPolicy::Fail);
        assert_eq!(" ignore ".parse::<ChecksumPolicy>().unwrap(), ChecksumPolicy::Ignore);
        assert!("strict".parse::<ChecksumPolicy>().is_err());
    }

    #[test]
    fn test_policy_yaml() {
        let yaml = "enabled: false\nupdatePolicy: interval:15\nchecksumPolicy: fail\n";
        let policy: RepositoryPolicy = serde_yaml::from_str(yaml).unwrap();
        assert!(!policy.enabled);
        assert_eq!(policy.update_policy, Some(UpdatePolicy::Interval(15)));
        assert_eq!(policy.checksum_policy, Some(ChecksumPolicy::Fail));

        let bad = "updatePolicy: sometimes\n";
        assert!(serde_yaml::from_str::<RepositoryPolicy>(bad).is_err());
    }

    #[test]
    fn test_policy_enabled_by_default() {
        let policy: RepositoryPolicy = serde_yaml::from_str("checksumPolicy: warn\n").unwrap();
        assert!(policy.enabled);
    }

    #[test]
    fn test_effective_policy_defaults() {
        let absent = EffectivePolicy::from_config(None);
        assert!(absent.enabled);
        assert_eq!(absent.update, UpdatePolicy::Daily);
        assert_eq!(absent.checksum, ChecksumPolicy::Warn);
        assert_eq!(absent.status(), "enabled");

        let disabled = EffectivePolicy::from_config(Some(&RepositoryPolicy::disabled()));
        assert!(!disabled.enabled);
        assert_eq!(disabled.status(), "disabled");
    }
}
