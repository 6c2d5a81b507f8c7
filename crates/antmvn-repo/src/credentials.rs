//! Credential and proxy attachment
//!
//! Repositories without explicit authentication pick up the server entry
//! stored in settings under their id. Repositories without an explicit proxy
//! pick up the single active settings proxy. Neither lookup can fail: a
//! missing entry just leaves the repository as it is.

use antmvn_core::{Authentication, Server, Settings};
use thiserror::Error;

use crate::resolved::ResolvedRepository;

#[derive(Debug, Error)]
#[error("Unable to decrypt password: {message}")]
pub struct DecryptError {
    pub message: String,
}

/// Turns a stored (possibly encrypted) password into plaintext
pub trait Decryptor {
    fn decrypt(&self, cipher_text: &str) -> Result<String, DecryptError>;
}

/// Passes plaintext through unchanged.
///
/// Values in `{...}` braces are encrypted; without a master password they
/// cannot be decrypted and are reported as such.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextDecryptor;

impl Decryptor for PlaintextDecryptor {
    fn decrypt(&self, cipher_text: &str) -> Result<String, DecryptError> {
        if is_encrypted(cipher_text) {
            return Err(DecryptError {
                message: "no master password is configured".to_string(),
            });
        }
        Ok(cipher_text.to_string())
    }
}

/// Whether a stored value uses the `{...}` encrypted form
pub fn is_encrypted(value: &str) -> bool {
    value.len() > 2 && value.starts_with('{') && value.ends_with('}')
}

/// Attaches stored credentials and the active proxy to repositories
pub struct CredentialResolver<'a> {
    settings: &'a Settings,
    decryptor: &'a dyn Decryptor,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(settings: &'a Settings, decryptor: &'a dyn Decryptor) -> Self {
        Self {
            settings,
            decryptor,
        }
    }

    /// Fill in authentication and proxy where not explicitly set
    pub fn attach(&self, mut repo: ResolvedRepository) -> ResolvedRepository {
        if repo.authentication.is_none() {
            repo.authentication = self
                .settings
                .server(&repo.id)
                .map(|server| self.authentication_for(server));
        }
        if repo.proxy.is_none() {
            repo.proxy = self.settings.active_proxy().cloned();
        }
        repo
    }

    fn authentication_for(&self, server: &Server) -> Authentication {
        let password = server.password.as_deref().map(|stored| {
            self.decryptor.decrypt(stored).unwrap_or_else(|e| {
                tracing::warn!("Server '{}': {}", server.id, e);
                stored.to_string()
            })
        });

        Authentication {
            username: server.username.clone(),
            password,
            private_key: server.private_key.clone(),
            passphrase: server.passphrase.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antmvn_core::{Proxy, RemoteRepositoryConfig, SettingsProxy};

    struct Rot13;

    impl Decryptor for Rot13 {
        fn decrypt(&self, cipher_text: &str) -> Result<String, DecryptError> {
            Ok(cipher_text
                .chars()
                .map(|c| match c {
                    'a'..='m' | 'A'..='M' => (c as u8 + 13) as char,
                    'n'..='z' | 'N'..='Z' => (c as u8 - 13) as char,
                    _ => c,
                })
                .collect())
        }
    }

    struct Broken;

    impl Decryptor for Broken {
        fn decrypt(&self, _cipher_text: &str) -> Result<String, DecryptError> {
            Err(DecryptError {
                message: "security settings unreadable".to_string(),
            })
        }
    }

    fn settings() -> Settings {
        Settings {
            servers: vec![Server {
                id: "corp".to_string(),
                username: Some("builder".to_string()),
                password: Some("frperg".to_string()),
                private_key: Some("/home/builder/.ssh/id_ed25519".to_string()),
                passphrase: None,
            }],
            proxies: vec![
                SettingsProxy {
                    id: Some("off".to_string()),
                    active: false,
                    proxy: Proxy::http("inactive.proxy", 8080),
                },
                SettingsProxy {
                    id: Some("on".to_string()),
                    active: true,
                    proxy: Proxy::http("active.proxy", 3128),
                },
            ],
            ..Settings::default()
        }
    }

    fn repo(id: &str) -> ResolvedRepository {
        ResolvedRepository::from_config(
            id.to_string(),
            RemoteRepositoryConfig::new(id, "https://repo.corp/maven"),
        )
    }

    #[test]
    fn test_attach_server_credentials() {
        let settings = settings();
        let resolver = CredentialResolver::new(&settings, &Rot13);

        let attached = resolver.attach(repo("corp"));
        let auth = attached.authentication.unwrap();
        assert_eq!(auth.username.as_deref(), Some("builder"));
        assert_eq!(auth.password.as_deref(), Some("secret"));
        assert_eq!(
            auth.private_key.as_deref(),
            Some("/home/builder/.ssh/id_ed25519")
        );
    }

    #[test]
    fn test_explicit_authentication_untouched() {
        let settings = settings();
        let resolver = CredentialResolver::new(&settings, &Rot13);

        let mut explicit = repo("corp");
        explicit.authentication = Some(Authentication::basic("me", "mine"));

        let attached = resolver.attach(explicit);
        assert_eq!(attached.principal(), Some("me"));
        assert_eq!(
            attached.authentication.unwrap().password.as_deref(),
            Some("mine")
        );
    }

    #[test]
    fn test_no_server_is_silent() {
        let settings = settings();
        let resolver = CredentialResolver::new(&settings, &Rot13);
        assert!(resolver.attach(repo("public")).authentication.is_none());
    }

    #[test]
    fn test_decryption_failure_keeps_stored_value() {
        let settings = settings();
        let resolver = CredentialResolver::new(&settings, &Broken);

        let auth = resolver.attach(repo("corp")).authentication.unwrap();
        assert_eq!(auth.password.as_deref(), Some("frperg"));
    }

    #[test]
    fn test_active_proxy_attached() {
        let settings = settings();
        let resolver = CredentialResolver::new(&settings, &PlaintextDecryptor);
        assert_eq!(resolver.attach(repo("public")).proxy_host(), Some("active.proxy"));
    }

    #[test]
    fn test_explicit_proxy_untouched() {
        let settings = settings();
        let resolver = CredentialResolver::new(&settings, &PlaintextDecryptor);

        let mut explicit = repo("public");
        explicit.proxy = Some(Proxy::http("mine.proxy", 8888));
        assert_eq!(resolver.attach(explicit).proxy_host(), Some("mine.proxy"));
    }

    #[test]
    fn test_no_active_proxy() {
        let settings = Settings::default();
        let resolver = CredentialResolver::new(&settings, &PlaintextDecryptor);
        let attached = resolver.attach(repo("public"));
        assert!(attached.proxy.is_none());
        assert!(attached.authentication.is_none());
    }

    #[test]
    fn test_plaintext_decryptor() {
        assert_eq!(PlaintextDecryptor.decrypt("hunter2").unwrap(), "hunter2");
        assert!(PlaintextDecryptor.decrypt("{COQLCE6DU6GtcS5P=}").is_err());
        assert!(!is_encrypted("{}"));
        assert!(is_encrypted("{abc}"));
    }
}
