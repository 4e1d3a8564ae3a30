use crate::core::error::{Error, ErrorKind, Result};

/// A word is invalid if it contains any code unit below `0x20` (control
/// characters, including `\0`).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}

/// Splits `text` on the ASCII space character only. Leading, trailing, and
/// repeated spaces never yield empty words. Borrows into `text`.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// Splits and validates every word, failing on the first control character.
pub fn split_words_checked(text: &str) -> Result<Vec<&str>> {
    let mut words = Vec::new();
    for word in split_words(text) {
        if !is_valid_word(word) {
            return Err(Error::new(
                ErrorKind::InvalidContent,
                format!("control character in word {word:?}"),
            ));
        }
        words.push(word);
    }
    Ok(words)
}
