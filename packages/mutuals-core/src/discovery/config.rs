//! Discovery pipeline configuration.
//!
//! Settings can be given in code, or loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::hashing::{DigestAlgorithm, IdentifierHasher};

/// Default bound on the contact read, in seconds.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Discovery pipeline configuration.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Digest applied to every normalized identifier.
    pub digest: DigestAlgorithm,
    /// Shared salt prefixed to every digest input. Both parties must agree.
    pub salt: Option<String>,
    /// Upper bound on reading the contact list.
    pub read_timeout: Duration,
    /// Number of digest workers.
    pub workers: usize,
}

impl DiscoveryConfig {
    /// Load configuration from environment variables.
    ///
    /// - `MUTUALS_DIGEST`: `sha256` (default), `sha384`, `sha512`
    /// - `MUTUALS_SALT`: shared salt, unset for none
    /// - `MUTUALS_READ_TIMEOUT_SECS`: contact read bound (default 30)
    /// - `MUTUALS_WORKERS`: digest workers (default: available parallelism)
    ///
    /// Unparsable values fall back to the default with a warning. A zero
    /// timeout or worker count also falls back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let digest = match env::var("MUTUALS_DIGEST") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!(value = value.as_str(), error = %e, "Ignoring MUTUALS_DIGEST");
                defaults.digest
            }),
            Err(_) => defaults.digest,
        };

        let read_timeout = env_parse::<u64>("MUTUALS_READ_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.read_timeout);

        let workers = env_parse::<usize>("MUTUALS_WORKERS")
            .filter(|w| *w > 0)
            .unwrap_or(defaults.workers);

        Self {
            digest,
            salt: env::var("MUTUALS_SALT").ok().filter(|s| !s.is_empty()),
            read_timeout,
            workers,
        }
    }

    /// Hasher configured with this digest and salt.
    pub fn hasher(&self) -> IdentifierHasher {
        let hasher = IdentifierHasher::new(self.digest);
        match &self.salt {
            Some(salt) => hasher.with_salt(salt),
            None => hasher,
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::Sha256,
            salt: None,
            read_timeout: Duration::from_secs(DEFAULT_READ_TIMEOUT_SECS),
            workers: default_workers(),
        }
    }
}

/// Available parallelism, at least one.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = value.as_str(), "Ignoring unparsable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.digest, DigestAlgorithm::Sha256);
        assert!(config.salt.is_none());
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_hasher_from_config() {
        let config = DiscoveryConfig {
            digest: DigestAlgorithm::Sha512,
            salt: Some("pepper".into()),
            ..DiscoveryConfig::default()
        };
        let hasher = config.hasher();
        assert_eq!(hasher.algorithm(), DigestAlgorithm::Sha512);
        assert!(hasher.is_salted());

        assert!(!DiscoveryConfig::default().hasher().is_salted());
    }

    // All env mutation lives in one test so parallel tests never race on it.
    #[test]
    fn test_from_env() {
        env::set_var("MUTUALS_DIGEST", "sha384");
        env::set_var("MUTUALS_SALT", "pepper");
        env::set_var("MUTUALS_READ_TIMEOUT_SECS", "5");
        env::set_var("MUTUALS_WORKERS", "3");
        let config = DiscoveryConfig::from_env();
        assert_eq!(config.digest, DigestAlgorithm::Sha384);
        assert_eq!(config.salt.as_deref(), Some("pepper"));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.workers, 3);

        env::set_var("MUTUALS_DIGEST", "md5");
        env::set_var("MUTUALS_READ_TIMEOUT_SECS", "soon");
        env::set_var("MUTUALS_WORKERS", "0");
        env::set_var("MUTUALS_SALT", "");
        let config = DiscoveryConfig::from_env();
        assert_eq!(config.digest, DigestAlgorithm::Sha256);
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert!(config.workers >= 1);
        assert!(config.salt.is_none());

        env::set_var("MUTUALS_READ_TIMEOUT_SECS", "0");
        let config = DiscoveryConfig::from_env();
        assert_eq!(config.read_timeout, Duration::from_secs(30));

        for key in [
            "MUTUALS_DIGEST",
            "MUTUALS_SALT",
            "MUTUALS_READ_TIMEOUT_SECS",
            "MUTUALS_WORKERS",
        ] {
            env::remove_var(key);
        }
    }
}
