//! Newline-delimited wordlist loader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a wordlist.
#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

static FALLBACK: [String; 1] = [String::new()];

/// Ordered list of words substituted into query arguments.
///
/// Lines are kept exactly as read: blank lines and surrounding whitespace are
/// significant fuzzing input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wordlist {
    words: Vec<String>,
}

impl Wordlist {
    /// A wordlist with no entries (no `--wordlist` given).
    #[must_use]
    pub const fn empty() -> Self {
        Self { words: Vec::new() }
    }

    #[must_use]
    pub const fn from_words(words: Vec<String>) -> Self {
        Self { words }
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words to fuzz with: the loaded entries, or a single empty string
    /// so every field is still queried once.
    #[must_use]
    pub fn fuzz_words(&self) -> &[String] {
        if self.words.is_empty() {
            &FALLBACK
        } else {
            &self.words
        }
    }
}

/// Strip the line terminator and decode, replacing invalid UTF-8.
fn decode_line(mut line: Vec<u8>) -> String {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    String::from_utf8(line)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Read one word per line from `path`.
///
/// Bytes that are not valid UTF-8 become U+FFFD rather than failing the load.
pub fn load_wordlist(path: &Path) -> Result<Wordlist, WordlistError> {
    let io_err = |source| WordlistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let words = BufReader::new(file)
        .split(b'\n')
        .map(|line| line.map(decode_line))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;

    debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(Wordlist::from_words(words))
}
