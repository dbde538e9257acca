//! Command-line interface for graphfuzz.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from validating command-line configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Both --endpoint and --gqlfile flags are required.")]
    MissingRequired,
}

/// Fuzz a GraphQL endpoint using its introspection schema.
#[derive(Debug, Parser)]
#[command(name = "graphfuzz", version, about)]
pub struct Cli {
    /// URL of the GraphQL endpoint.
    #[arg(long, env = "GRAPHFUZZ_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Path to the GraphQL schema file in JSON (introspection) format.
    #[arg(long, env = "GRAPHFUZZ_GQLFILE", value_name = "PATH")]
    pub gqlfile: Option<String>,

    /// Path to the wordlist file (optional).
    #[arg(long, env = "GRAPHFUZZ_WORDLIST", value_name = "PATH")]
    pub wordlist: Option<PathBuf>,

    /// Per-request timeout in seconds (default: none).
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Print the generated queries without sending them.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub schema_path: PathBuf,
    pub wordlist_path: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub dry_run: bool,
}

impl Cli {
    /// Build the run configuration. Empty values count as not given.
    pub fn config(&self) -> Result<Config, ConfigError> {
        let endpoint = self.endpoint.as_deref().filter(|e| !e.is_empty());
        let schema_path = self.gqlfile.as_deref().filter(|p| !p.is_empty());

        let (Some(endpoint), Some(schema_path)) = (endpoint, schema_path) else {
            return Err(ConfigError::MissingRequired);
        };

        Ok(Config {
            endpoint: endpoint.to_string(),
            schema_path: PathBuf::from(schema_path),
            wordlist_path: self.wordlist.clone(),
            timeout: self.timeout.map(Duration::from_secs),
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("graphfuzz").chain(args.iter().copied()))
            .expect("parse")
    }

    #[test]
    fn test_config_with_required_flags() {
        let cli = parse(&["--endpoint", "http://localhost/graphql", "--gqlfile", "schema.json"]);
        let config = cli.config().expect("config");

        assert_eq!(config.endpoint, "http://localhost/graphql");
        assert_eq!(config.schema_path, PathBuf::from("schema.json"));
        assert_eq!(config.wordlist_path, None);
        assert_eq!(config.timeout, None);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_config_with_optional_flags() {
        let cli = parse(&[
            "--endpoint=http://localhost/graphql",
            "--gqlfile=schema.json",
            "--wordlist=words.txt",
            "--timeout=10",
            "--dry-run",
        ]);
        let config = cli.config().expect("config");

        assert_eq!(config.wordlist_path, Some(PathBuf::from("words.txt")));
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert!(config.dry_run);
    }

    #[test]
    fn test_config_missing_endpoint() {
        let cli = parse(&["--gqlfile", "schema.json"]);
        assert_eq!(cli.config(), Err(ConfigError::MissingRequired));
    }

    #[test]
    fn test_config_missing_gqlfile() {
        let cli = parse(&["--endpoint", "http://localhost/graphql"]);
        assert_eq!(cli.config(), Err(ConfigError::MissingRequired));
    }

    #[test]
    fn test_config_empty_endpoint_counts_as_missing() {
        let cli = parse(&["--endpoint", "", "--gqlfile", "schema.json"]);
        assert_eq!(cli.config(), Err(ConfigError::MissingRequired));
    }

    #[test]
    fn test_config_empty_gqlfile_counts_as_missing() {
        let cli = parse(&["--endpoint", "http://localhost/graphql", "--gqlfile", ""]);
        assert_eq!(cli.config(), Err(ConfigError::MissingRequired));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = Cli::try_parse_from(["graphfuzz", "--timeout", "0"]);
        assert!(result.is_err());
    }
}
