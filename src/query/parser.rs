use crate::analysis::stopwords::StopWords;
use crate::analysis::tokenizer::{is_valid_word, split_words};
use crate::core::error::{Error, ErrorKind, Result};
use crate::query::ast::Query;

/// One parsed token of the query mini-language: a word, and whether it
/// carried a leading `-`.
struct QueryWord<'a> {
    text: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>> {
    if !is_valid_word(word) {
        return Err(Error::new(
            ErrorKind::InvalidQuery,
            format!("control character in query token {word:?}"),
        ));
    }

    let Some(rest) = word.strip_prefix('-') else {
        return Ok(QueryWord {
            text: word,
            is_minus: false,
        });
    };

    if rest.is_empty() {
        return Err(Error::new(ErrorKind::InvalidQuery, "bare '-' token"));
    }
    if rest.starts_with('-') {
        return Err(Error::new(
            ErrorKind::InvalidQuery,
            format!("double leading '-' in token {word:?}"),
        ));
    }
    Ok(QueryWord {
        text: rest,
        is_minus: true,
    })
}

/// Parses `raw_query` into a `Query`, discarding stop-words silently.
/// `dedup` controls whether both term sequences are sorted and
/// de-duplicated before returning (the sequential path does this; the
/// parallel path defers de-duplication to the scorer, where repeated
/// accumulation is commutative).
pub fn parse_query<'a>(raw_query: &'a str, stop_words: &StopWords, dedup: bool) -> Result<Query<'a>> {
    let mut query = Query::default();
    for word in split_words(raw_query) {
        let parsed = parse_query_word(word)?;
        if stop_words.contains(parsed.text) {
            continue;
        }
        if parsed.is_minus {
            query.minus.push(parsed.text);
        } else {
            query.plus.push(parsed.text);
        }
    }
    if dedup {
        query.dedup_sorted();
    }
    Ok(query)
}
