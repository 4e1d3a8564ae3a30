use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::analysis::stopwords::StopWords;
use crate::analysis::tokenizer::split_words_checked;
use crate::core::config::SearchServerConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{average_rating, Document, DocumentMeta, DocumentStatus};
use crate::index::inverted::Index;
use crate::parallel::accumulator::ShardedAccumulator;
use crate::query::ast::Query;
use crate::query::parser::parse_query;
use crate::scoring::scorer::{inverse_document_frequency, rank, rank_parallel};

/// Selects between the sequential and data-parallel execution path for an
/// operation. Collapses the original's `ExecutionPolicy` template overloads
/// into a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    #[default]
    Sequential,
    Parallel,
}

/// An in-memory, incrementally updatable TF-IDF search index.
///
/// Mutations (`add_document`, `remove_document`) take `&mut self` and must
/// be serialized by the caller with respect to any other operation, since
/// there is no internal writer lock. Read operations take `&self` and may
/// run concurrently with each other.
pub struct SearchServer {
    stop_words: StopWords,
    storage: Vec<String>,
    index: Index,
    config: SearchServerConfig,
}

impl SearchServer {
    pub fn new(stop_words: StopWords) -> Self {
        Self::with_config(stop_words, SearchServerConfig::default())
    }

    pub fn with_config(stop_words: StopWords, config: SearchServerConfig) -> Self {
        SearchServer {
            stop_words,
            storage: Vec::new(),
            index: Index::new(),
            config,
        }
    }

    /// Builds the stop-word set from a single whitespace-delimited string.
    pub fn from_stop_words_str(text: &str) -> Result<Self> {
        Ok(Self::new(StopWords::from_str(text)?))
    }

    /// Builds the stop-word set from any container of words.
    pub fn from_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(StopWords::from_words(words)?))
    }

    pub fn get_document_count(&self) -> i32 {
        self.index.doc_count() as i32
    }

    /// Ascending iteration over the currently present document ids.
    pub fn doc_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.index.doc_ids.iter().copied()
    }

    /// Mapping of word to term frequency for `id`; empty if `id` is unknown.
    pub fn get_word_frequencies(&self, id: i32) -> HashMap<String, f64> {
        self.index.word_frequencies(id).cloned().unwrap_or_default()
    }

    pub fn add_document(
        &mut self,
        id: i32,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(Error::new(
                ErrorKind::InvalidDocumentId,
                format!("document id {id} is negative"),
            ));
        }
        if self.index.contains(id) {
            return Err(Error::new(
                ErrorKind::DuplicateDocumentId,
                format!("document id {id} already exists"),
            ));
        }
        let words = split_words_checked(text)?;

        let mut term_counts: HashMap<&str, u32> = HashMap::new();
        let mut token_count = 0usize;
        for word in &words {
            if self.stop_words.contains(word) {
                continue;
            }
            *term_counts.entry(*word).or_insert(0) += 1;
            token_count += 1;
        }

        let meta = DocumentMeta {
            rating: average_rating(ratings),
            status,
        };
        self.index.insert_document(id, term_counts, token_count, meta);
        self.storage.push(text.to_string());
        debug!(document_id = id, tokens = token_count, "added document");
        Ok(())
    }

    /// Removes `id`. A no-op if `id` is not present, including on repeat
    /// calls after the first successful removal.
    pub fn remove_document(&mut self, id: i32) {
        self.remove_document_with_policy(id, Policy::Sequential);
    }

    pub fn remove_document_with_policy(&mut self, id: i32, policy: Policy) {
        match policy {
            Policy::Sequential => self.index.remove_document(id),
            Policy::Parallel => self.index.remove_document_parallel(id),
        }
        debug!(document_id = id, ?policy, "removed document");
    }

    /// Returns at most `config.max_results` documents matching `raw_query`
    /// and `predicate`, ordered by the composite order of §4.6.
    pub fn find_top_documents<F>(&self, raw_query: &str, policy: Policy, predicate: F) -> Result<Vec<Document>>
    where
        F: Fn(i32, DocumentStatus, i32) -> bool + Sync,
    {
        if raw_query.is_empty() {
            return Ok(Vec::new());
        }
        let dedup = policy == Policy::Sequential;
        let query = parse_query(raw_query, &self.stop_words, dedup)?;
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let total_docs = self.index.doc_count();
        let scored = match policy {
            Policy::Sequential => self.score_sequential(&query, total_docs, &predicate),
            Policy::Parallel => self.score_parallel(&query, total_docs, &predicate),
        };
        trace!(candidates = scored.len(), ?policy, "scored query");

        let ranked = match policy {
            Policy::Sequential => rank(scored, self.config.max_results),
            Policy::Parallel => rank_parallel(scored, self.config.max_results),
        };
        Ok(ranked)
    }

    /// Convenience wrapper: only `ACTUAL` documents are considered.
    pub fn find_top_documents_actual(&self, raw_query: &str, policy: Policy) -> Result<Vec<Document>> {
        self.find_top_documents(raw_query, policy, |_, status, _| status == DocumentStatus::Actual)
    }

    /// Convenience wrapper: only documents with the given status are
    /// considered.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        policy: Policy,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents(raw_query, policy, move |_, s, _| s == status)
    }

    fn score_sequential<F>(&self, query: &Query, total_docs: usize, predicate: &F) -> Vec<Document>
    where
        F: Fn(i32, DocumentStatus, i32) -> bool,
    {
        let mut acc: HashMap<i32, f64> = HashMap::new();
        for &word in &query.plus {
            let Some(postings) = self.index.inverted.get(word) else {
                continue;
            };
            let idf = inverse_document_frequency(total_docs, postings.len());
            for (&id, &tf) in postings {
                let meta = &self.index.docs[&id];
                if predicate(id, meta.status, meta.rating) {
                    *acc.entry(id).or_insert(0.0) += tf * idf;
                }
            }
        }
        for &word in &query.minus {
            if let Some(postings) = self.index.inverted.get(word) {
                for &id in postings.keys() {
                    acc.remove(&id);
                }
            }
        }
        acc.into_iter()
            .map(|(id, relevance)| Document::new(id, relevance, self.index.docs[&id].rating))
            .collect()
    }

    fn score_parallel<F>(&self, query: &Query, total_docs: usize, predicate: &F) -> Vec<Document>
    where
        F: Fn(i32, DocumentStatus, i32) -> bool + Sync,
    {
        let acc = ShardedAccumulator::new(self.config.shard_count);
        query.plus.par_iter().for_each(|&word| {
            let Some(postings) = self.index.inverted.get(word) else {
                return;
            };
            let idf = inverse_document_frequency(total_docs, postings.len());
            for (&id, &tf) in postings {
                let meta = &self.index.docs[&id];
                if predicate(id, meta.status, meta.rating) {
                    acc.get_ref(id) += tf * idf;
                }
            }
        });
        query.minus.par_iter().for_each(|&word| {
            if let Some(postings) = self.index.inverted.get(word) {
                for &id in postings.keys() {
                    acc.erase(id);
                }
            }
        });
        acc.build_ordered()
            .into_iter()
            .map(|(id, relevance)| Document::new(id, relevance, self.index.docs[&id].rating))
            .collect()
    }

    /// Returns the sorted, duplicate-free plus-terms of `raw_query` present
    /// in `id`'s postings, or an empty vector if any minus-term occurs in
    /// the document. Fails with `MissingDocument` if `id` is unknown.
    pub fn match_document<'a>(
        &self,
        raw_query: &'a str,
        policy: Policy,
        id: i32,
    ) -> Result<(Vec<&'a str>, DocumentStatus)> {
        let meta = self
            .index
            .docs
            .get(&id)
            .ok_or_else(|| Error::new(ErrorKind::MissingDocument, format!("document {id} not found")))?;
        let status = meta.status;

        if raw_query.is_empty() {
            return Ok((Vec::new(), status));
        }

        let dedup = policy == Policy::Sequential;
        let query = parse_query(raw_query, &self.stop_words, dedup)?;
        let forward = &self.index.forward[&id];

        let has_minus_hit = match policy {
            Policy::Sequential => query.minus.iter().any(|w| forward.contains_key(*w)),
            Policy::Parallel => query.minus.par_iter().any(|w| forward.contains_key(*w)),
        };
        if has_minus_hit {
            return Ok((Vec::new(), status));
        }

        let mut matched: Vec<&str> = match policy {
            Policy::Sequential => query
                .plus
                .iter()
                .filter(|w| forward.contains_key(**w))
                .copied()
                .collect(),
            Policy::Parallel => {
                let mut buf: Vec<&str> = query
                    .plus
                    .par_iter()
                    .copied()
                    .filter(|w| forward.contains_key(*w))
                    .collect();
                buf.par_sort_unstable();
                buf.dedup();
                return Ok((buf, status));
            }
        };
        matched.sort_unstable();
        matched.dedup();
        Ok((matched, status))
    }
}
