use std::collections::HashSet;

use crate::analysis::tokenizer::is_valid_word;
use crate::core::error::{Error, ErrorKind, Result};

/// Immutable set of words ignored during both indexing and query parsing.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Builds a set from a single whitespace-delimited string. Any run of
    /// whitespace separates words (unlike document/query tokenization,
    /// which splits on the ASCII space only) because this is a one-shot,
    /// human-authored list, not indexed text.
    pub fn from_str(text: &str) -> Result<Self> {
        Self::from_words(text.split_whitespace())
    }

    /// Builds a set from any container of words. Empty words are dropped
    /// silently; a control character in any word is rejected.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(Error::new(
                    ErrorKind::InvalidStopWord,
                    format!("control character in stop word {word:?}"),
                ));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(StopWords { words: set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
