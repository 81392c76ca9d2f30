//! Mutuals CLI
//!
//! Runs contact discovery from the terminal:
//!
//! 1. **hash**: read a contacts JSON file, hash every phone number and email,
//!    and print the sorted hash list to hand to the other party.
//!
//! 2. **compare**: hash the same way, read the other party's hash list from a
//!    file or stdin, and print the hashes both sides have in common.
//!
//! **Privacy**: only hashes are printed or logged. Contact values never leave
//! the process.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use tokio::io::AsyncReadExt;

use mutuals_core::contacts::FileContactSource;
use mutuals_core::discovery::{DiscoveryConfig, DiscoveryService};
use mutuals_core::hashing::{DigestAlgorithm, LocalHashSet};
use mutuals_core::matching::{match_hashes, MatchResult};

// ── CLI Arguments ─────────────────────────────────────────────────────────────

/// Flags override the `MUTUALS_*` environment variables read by
/// [`DiscoveryConfig::from_env`], which in turn override the defaults.
#[derive(Parser, Debug)]
#[command(name = "mutuals", version, about = "Privacy-preserving contact discovery")]
struct Args {
    /// Digest applied to normalized identifiers: sha256, sha384, sha512
    /// [env: MUTUALS_DIGEST] [default: sha256]
    #[arg(long, global = true)]
    digest: Option<DigestAlgorithm>,

    /// Shared salt prefixed to every digest input. Both parties must use the
    /// same one. [env: MUTUALS_SALT]
    #[arg(long, global = true)]
    salt: Option<String>,

    /// Upper bound on reading the contacts file, in seconds
    /// [env: MUTUALS_READ_TIMEOUT_SECS] [default: 30]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    read_timeout_secs: Option<u64>,

    /// Number of digest workers [env: MUTUALS_WORKERS] [default: available parallelism]
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    workers: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a contacts file and print the sorted hash list
    Hash {
        /// Contacts JSON file
        #[arg(short, long)]
        contacts: PathBuf,

        /// Write hashes here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare a contacts file with the other party's hash list
    Compare {
        /// Contacts JSON file
        #[arg(short, long)]
        contacts: PathBuf,

        /// Other party's hashes, one per line; `-` reads stdin
        #[arg(short, long)]
        remote: PathBuf,
    },
}

impl Args {
    fn config(&self) -> DiscoveryConfig {
        self.apply(DiscoveryConfig::from_env())
    }

    fn apply(&self, mut config: DiscoveryConfig) -> DiscoveryConfig {
        if let Some(digest) = self.digest {
            config.digest = digest;
        }
        if let Some(salt) = &self.salt {
            config.salt = Some(salt.clone()).filter(|s| !s.is_empty());
        }
        if let Some(secs) = self.read_timeout_secs {
            config.read_timeout = Duration::from_secs(secs);
        }
        if let Some(workers) = self.workers {
            config.workers = usize::try_from(workers).unwrap_or(usize::MAX);
        }
        config
    }
}

// ── Entry Point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mutuals=info,mutuals_core=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = args.config();

    match args.command {
        Command::Hash { contacts, output } => {
            let set = hash_contacts(contacts, config).await?;
            tracing::info!(unique_hashes = set.len(), "Local hash set ready");

            let text = hash_list(&set);
            match output {
                Some(path) => tokio::fs::write(&path, text)
                    .await
                    .wrap_err_with(|| format!("writing {}", path.display()))?,
                None => print!("{}", text),
            }
        }
        Command::Compare { contacts, remote } => {
            let set = hash_contacts(contacts, config).await?;
            let remote_text = read_remote(&remote).await?;
            let result = match_hashes(&set, &remote_text);
            tracing::info!(
                unique_hashes = set.len(),
                matches = result.count,
                "Compared with remote hashes"
            );
            print!("{}", match_report(&result));
        }
    }

    Ok(())
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn hash_contacts(path: PathBuf, config: DiscoveryConfig) -> color_eyre::Result<LocalHashSet> {
    let display = path.display().to_string();
    let service = DiscoveryService::new(FileContactSource::new(path), config);
    service
        .hash_contacts()
        .await
        .wrap_err_with(|| format!("hashing contacts from {}", display))
}

async fn read_remote(path: &Path) -> color_eyre::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .wrap_err("reading remote hashes from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("reading remote hashes from {}", path.display()))
}

/// Sorted hashes, one per line, with a trailing newline when non-empty.
fn hash_list(set: &LocalHashSet) -> String {
    let mut text = set.to_text();
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn match_report(result: &MatchResult) -> String {
    let mut report = format!("Matches Found: {}\n", result.count);
    for hash in &result.matched_hashes {
        report.push_str(hash.as_str());
        report.push('\n');
    }
    report
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn contacts_file(json: serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();
        file
    }

    #[test]
    fn test_parse_hash_command() {
        let args = Args::try_parse_from([
            "mutuals", "hash", "--contacts", "book.json", "--output", "out.txt",
        ])
        .unwrap();
        assert!(args.digest.is_none());
        assert!(matches!(
            args.command,
            Command::Hash { ref output, .. } if output.as_deref() == Some(Path::new("out.txt"))
        ));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "mutuals",
            "compare",
            "-c",
            "book.json",
            "-r",
            "-",
            "--digest",
            "sha512",
            "--salt",
            "pepper",
            "--read-timeout-secs",
            "5",
            "--workers",
            "2",
        ])
        .unwrap();
        let config = args.apply(DiscoveryConfig::default());
        assert_eq!(config.digest, DigestAlgorithm::Sha512);
        assert_eq!(config.salt.as_deref(), Some("pepper"));
        assert_eq!(config.read_timeout, Duration::from_secs(5));
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_rejects_unknown_digest() {
        let result = Args::try_parse_from(["mutuals", "--digest", "md5", "hash", "-c", "a.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_timeout_and_workers() {
        for flag in ["--read-timeout-secs", "--workers"] {
            let result = Args::try_parse_from(["mutuals", "hash", "-c", "a.json", flag, "0"]);
            assert!(result.is_err(), "{} 0 accepted", flag);
        }
    }

    #[test]
    fn test_unset_flags_keep_base_config() {
        let args = Args::try_parse_from(["mutuals", "hash", "-c", "a.json"]).unwrap();
        let base = DiscoveryConfig {
            digest: DigestAlgorithm::Sha384,
            salt: Some("from-env".into()),
            read_timeout: Duration::from_secs(9),
            workers: 3,
        };
        let config = args.apply(base);
        assert_eq!(config.digest, DigestAlgorithm::Sha384);
        assert_eq!(config.salt.as_deref(), Some("from-env"));
        assert_eq!(config.read_timeout, Duration::from_secs(9));
        assert_eq!(config.workers, 3);
    }

    #[test]
    fn test_empty_salt_flag_clears_salt() {
        let args = Args::try_parse_from(["mutuals", "hash", "-c", "a.json", "--salt", ""]).unwrap();
        let base = DiscoveryConfig {
            salt: Some("from-env".into()),
            ..DiscoveryConfig::default()
        };
        assert!(args.apply(base).salt.is_none());
    }

    #[tokio::test]
    async fn test_hash_then_compare_files() {
        let ours = contacts_file(serde_json::json!([
            {"name": "Alice", "phoneNumbers": [{"number": "(555) 123-4567"}], "emails": []},
            {"emails": [{"email": "Bob@Example.com"}]}
        ]));
        let theirs = contacts_file(serde_json::json!([
            {"phoneNumbers": [{"number": "555.123.4567"}, {"number": "555 000 0000"}]}
        ]));

        let config = DiscoveryConfig::default();
        let our_set = hash_contacts(ours.path().to_path_buf(), config.clone())
            .await
            .unwrap();
        let their_set = hash_contacts(theirs.path().to_path_buf(), config)
            .await
            .unwrap();
        assert_eq!(our_set.len(), 2);

        let mut remote = tempfile::NamedTempFile::new().unwrap();
        remote.write_all(hash_list(&their_set).as_bytes()).unwrap();
        let remote_text = read_remote(remote.path()).await.unwrap();

        let report = match_report(&match_hashes(&our_set, &remote_text));
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("Matches Found: 1"));
        assert_eq!(lines.count(), 1);
    }

    #[tokio::test]
    async fn test_missing_contacts_file_errors() {
        let err = hash_contacts(PathBuf::from("/nonexistent/contacts.json"), DiscoveryConfig::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("hashing contacts"));
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(match_report(&MatchResult::default()), "Matches Found: 0\n");
        assert_eq!(hash_list(&LocalHashSet::new()), "");
    }
}
