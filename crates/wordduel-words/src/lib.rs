//! The accepted-word list for WordDuel.
//!
//! A [`Dictionary`] is loaded once at startup from a JSON array of words
//! (the format the production word list ships in) and is immutable
//! afterwards. The only query is membership: a word is either accepted or
//! it isn't — "not found" is a boolean, not a failure.
//!
//! Entries are normalized to lowercase at load time; callers lowercase
//! their input before asking.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Errors that can occur while loading a word list.
#[derive(Debug, thiserror::Error)]
pub enum WordsError {
    /// The word-list file could not be read.
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON array of strings.
    #[error("failed to parse word list: {0}")]
    Parse(#[from] serde_json::Error),

    /// The list parsed but contains no words — a server with an empty
    /// dictionary would reject every word, so refuse to start.
    #[error("word list is empty")]
    Empty,
}

/// A read-only set of accepted words.
#[derive(Debug)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Loads a dictionary from a JSON array file, e.g. `["apple","angle"]`.
    ///
    /// # Errors
    /// Returns [`WordsError`] if the file can't be read, isn't a JSON
    /// string array, or contains no words.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WordsError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dict = Self::from_reader(BufReader::new(file))?;
        tracing::info!(words = dict.len(), path = %path.display(), "word list loaded");
        Ok(dict)
    }

    /// Loads a dictionary from any JSON-array reader.
    ///
    /// # Errors
    /// Returns [`WordsError::Parse`] on malformed JSON and
    /// [`WordsError::Empty`] if the array has no entries.
    pub fn from_reader(reader: impl Read) -> Result<Self, WordsError> {
        let entries: Vec<String> = serde_json::from_reader(reader)?;
        if entries.is_empty() {
            return Err(WordsError::Empty);
        }
        Ok(Self::from_words(entries))
    }

    /// Builds a dictionary from an iterator of words. Mainly for tests
    /// and embedders that bring their own list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        Self { words }
    }

    /// Returns `true` if `word` is in the list. Exact match — callers
    /// lowercase their input first.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of accepted words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
