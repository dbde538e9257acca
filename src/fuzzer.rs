//! The fuzzing loop.
//!
//! Loads the wordlist and schema, then sends every generated query in order,
//! one at a time, writing each result to the output sink. A failed query is
//! reported and the loop moves on.

use crate::cli::Config;
use crate::client::{Client, ClientError};
use crate::query::{fuzz_queries, FuzzCase};
use crate::schema::{load_schema, SchemaError};
use crate::wordlist::{load_wordlist, Wordlist, WordlistError};
use std::io::Write;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a run before or during the loop.
#[derive(Debug, Error)]
pub enum FuzzError {
    #[error("Error reading wordlist: {0}")]
    Wordlist(#[from] WordlistError),

    #[error("Error reading schema file: {0}")]
    Schema(#[from] SchemaError),

    #[error("Error creating client: {0}")]
    Client(#[from] ClientError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Counts for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Answered queries whose envelope carried a non-empty `errors` member.
    pub server_errors: usize,
}

/// Run a full fuzzing pass described by `config`, writing the report to `out`.
pub async fn run<W: Write>(config: &Config, out: &mut W) -> Result<RunSummary, FuzzError> {
    let wordlist = match &config.wordlist_path {
        Some(path) => load_wordlist(path)?,
        None => Wordlist::empty(),
    };
    let types = load_schema(&config.schema_path)?;
    let words = wordlist.fuzz_words();

    if config.dry_run {
        return print_queries(fuzz_queries(&types, words), out);
    }

    let client = Client::new(&config.endpoint, config.timeout)?;
    info!(
        "Fuzzing {} with {} types and {} words",
        client.endpoint(),
        types.len(),
        words.len()
    );

    let summary = send_queries(&client, fuzz_queries(&types, words), out).await?;
    info!(
        "Sent {} queries: {} answered ({} with errors), {} failed",
        summary.attempted, summary.succeeded, summary.server_errors, summary.failed
    );
    Ok(summary)
}

/// Send each case in turn and report the outcome.
pub async fn send_queries<'a, W, I>(
    client: &Client,
    cases: I,
    out: &mut W,
) -> Result<RunSummary, FuzzError>
where
    W: Write,
    I: IntoIterator<Item = FuzzCase<'a>>,
{
    let mut summary = RunSummary::default();

    for case in cases {
        debug!(
            "Fuzzing {}.{} with {:?}",
            case.type_name, case.field_name, case.word
        );
        summary.attempted += 1;

        match client.send(&case.query).await {
            Ok(envelope) => {
                summary.succeeded += 1;
                if envelope.has_errors() {
                    summary.server_errors += 1;
                }
                writeln!(out, "Fuzzed Query: {}\nResponse: {envelope}", case.query)?;
            }
            Err(e) => {
                summary.failed += 1;
                warn!("{} failed: {}", case.query, e);
                writeln!(out, "Error sending fuzzed request: {e}")?;
            }
        }
        out.flush()?;
    }

    Ok(summary)
}

fn print_queries<'a, W, I>(cases: I, out: &mut W) -> Result<RunSummary, FuzzError>
where
    W: Write,
    I: IntoIterator<Item = FuzzCase<'a>>,
{
    let mut summary = RunSummary::default();
    for case in cases {
        summary.attempted += 1;
        writeln!(out, "Fuzzed Query: {}", case.query)?;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SCHEMA: &str = r#"{"data": {"__schema": {"types": [
        {"kind": "OBJECT", "name": "Query", "fields": [{"name": "user", "args": []}]},
        {"kind": "OBJECT", "name": "User", "fields": [
            {"name": "getName", "args": [{"name": "id"}]},
            {"name": "email", "args": []}
        ]}
    ]}}}"#;

    fn temp_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    fn dry_run_config(schema: PathBuf, wordlist: Option<PathBuf>) -> Config {
        Config {
            endpoint: "http://127.0.0.1:9/graphql".into(),
            schema_path: schema,
            wordlist_path: wordlist,
            timeout: None,
            dry_run: true,
        }
    }

    #[tokio::test]
    async fn test_dry_run_without_wordlist() {
        let schema = temp_file(SCHEMA);
        let config = dry_run_config(schema.path().to_path_buf(), None);

        let mut out = Vec::new();
        let summary = run(&config, &mut out).await.expect("run");

        assert_eq!(summary.attempted, 2);
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "Fuzzed Query: { User(id: \"\") { getName } }\n\
             Fuzzed Query: { User() { email } }\n"
        );
    }

    #[tokio::test]
    async fn test_dry_run_with_wordlist() {
        let schema = temp_file(SCHEMA);
        let words = temp_file("a\n\nb\n");
        let config = dry_run_config(
            schema.path().to_path_buf(),
            Some(words.path().to_path_buf()),
        );

        let mut out = Vec::new();
        let summary = run(&config, &mut out).await.expect("run");

        assert_eq!(summary.attempted, 6);
        let output = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Fuzzed Query: { User(id: \"a\") { getName } }");
        assert_eq!(lines[1], "Fuzzed Query: { User(id: \"\") { getName } }");
        assert_eq!(lines[2], "Fuzzed Query: { User(id: \"b\") { getName } }");
        assert_eq!(lines[3], "Fuzzed Query: { User() { email } }");
    }

    #[tokio::test]
    async fn test_missing_wordlist_aborts() {
        let schema = temp_file(SCHEMA);
        let config = dry_run_config(
            schema.path().to_path_buf(),
            Some(PathBuf::from("/nonexistent/graphfuzz/words.txt")),
        );

        let mut out = Vec::new();
        let err = run(&config, &mut out).await.expect_err("should fail");
        assert!(matches!(err, FuzzError::Wordlist(_)));
        assert!(err.to_string().starts_with("Error reading wordlist:"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_bad_schema_aborts() {
        let schema = temp_file("{\"data\": {}}");
        let config = dry_run_config(schema.path().to_path_buf(), None);

        let mut out = Vec::new();
        let err = run(&config, &mut out).await.expect_err("should fail");
        assert!(matches!(err, FuzzError::Schema(SchemaError::Parse { .. })));
        assert!(err.to_string().starts_with("Error reading schema file:"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_send_failures_do_not_stop_loop() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let schema = temp_file(SCHEMA);
        let config = Config {
            endpoint: format!("http://{addr}/graphql"),
            schema_path: schema.path().to_path_buf(),
            wordlist_path: None,
            timeout: None,
            dry_run: false,
        };

        let mut out = Vec::new();
        let summary = run(&config, &mut out).await.expect("run");
        assert_eq!(
            summary,
            RunSummary {
                attempted: 2,
                succeeded: 0,
                failed: 2,
                server_errors: 0,
            }
        );

        let output = String::from_utf8(out).expect("utf8");
        assert_eq!(output.matches("Error sending fuzzed request:").count(), 2);
    }
}
