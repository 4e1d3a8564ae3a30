use std::collections::{BTreeSet, HashMap};

use crate::core::types::DocumentMeta;

/// The inverted and forward postings plus per-document metadata.
///
/// Invariants:
/// - `doc_id ∈ doc_ids ⇔ doc_id ∈ docs ⇔ doc_id ∈ forward`.
/// - for every `word ∈ inverted` and `doc_id ∈ inverted[word]`,
///   `forward[doc_id][word]` holds the identical frequency.
/// - no entry in `inverted` maps to an empty posting map.
#[derive(Debug, Default)]
pub struct Index {
    pub inverted: HashMap<String, HashMap<i32, f64>>,
    pub forward: HashMap<i32, HashMap<String, f64>>,
    pub docs: HashMap<i32, DocumentMeta>,
    pub doc_ids: BTreeSet<i32>,
}

impl Index {
    pub fn new() -> Self {
        Index::default()
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.docs.contains_key(&id)
    }

    /// Registers a document's postings, computed from `term_counts` (word
    /// -> occurrence count among non-stop tokens) and `token_count` (total
    /// non-stop token count, used for the `1/n` term-frequency divisor).
    pub fn insert_document(
        &mut self,
        id: i32,
        term_counts: HashMap<&str, u32>,
        token_count: usize,
        meta: DocumentMeta,
    ) {
        let mut forward_entry = HashMap::with_capacity(term_counts.len());
        if token_count > 0 {
            let inv = 1.0 / token_count as f64;
            for (word, count) in term_counts {
                let tf = inv * count as f64;
                self.inverted
                    .entry(word.to_string())
                    .or_default()
                    .insert(id, tf);
                forward_entry.insert(word.to_string(), tf);
            }
        }
        self.forward.insert(id, forward_entry);
        self.docs.insert(id, meta);
        self.doc_ids.insert(id);
    }

    /// Removes a document, pruning any posting list left empty. No-op if
    /// `id` is not present.
    pub fn remove_document(&mut self, id: i32) {
        let Some(words) = self.forward.remove(&id) else {
            return;
        };
        self.doc_ids.remove(&id);
        self.docs.remove(&id);
        for word in words.into_keys() {
            self.erase_posting(&word, id);
        }
    }

    /// Removes a document using a read-only parallel pass to determine
    /// which postings become empty, then applies the structural mutation
    /// on the caller's thread. See DESIGN.md for why the mutation itself
    /// is not parallelized.
    pub fn remove_document_parallel(&mut self, id: i32) {
        use rayon::prelude::*;

        let Some(words) = self.forward.remove(&id) else {
            return;
        };
        self.doc_ids.remove(&id);
        self.docs.remove(&id);

        let words: Vec<String> = words.into_keys().collect();
        let becomes_empty: Vec<bool> = words
            .par_iter()
            .map(|word| {
                self.inverted
                    .get(word)
                    .map(|postings| postings.len() == 1 && postings.contains_key(&id))
                    .unwrap_or(false)
            })
            .collect();

        for (word, empty_after) in words.iter().zip(becomes_empty) {
            if empty_after {
                self.inverted.remove(word);
            } else if let Some(postings) = self.inverted.get_mut(word) {
                postings.remove(&id);
            }
        }
    }

    fn erase_posting(&mut self, word: &str, id: i32) {
        if let Some(postings) = self.inverted.get_mut(word) {
            postings.remove(&id);
            if postings.is_empty() {
                self.inverted.remove(word);
            }
        }
    }

    pub fn word_frequencies(&self, id: i32) -> Option<&HashMap<String, f64>> {
        self.forward.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocumentStatus;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            rating: 0,
            status: DocumentStatus::Actual,
        }
    }

    fn counts(words: &[&'static str]) -> (HashMap<&'static str, u32>, usize) {
        let mut counts = HashMap::new();
        for &w in words {
            *counts.entry(w).or_insert(0) += 1;
        }
        (counts, words.len())
    }

    #[test]
    fn insert_then_remove_restores_empty_state() {
        let mut idx = Index::new();
        let (counts, n) = counts(&["cat", "in", "the", "city"]);
        idx.insert_document(42, counts, n, meta());
        assert_eq!(idx.doc_count(), 1);
        assert!(idx.inverted.contains_key("cat"));

        idx.remove_document(42);
        assert_eq!(idx.doc_count(), 0);
        assert!(idx.inverted.is_empty());
        assert!(idx.forward.is_empty());
        assert!(idx.doc_ids.is_empty());
    }

    #[test]
    fn empty_posting_lists_are_pruned() {
        let mut idx = Index::new();
        let (c1, n1) = counts(&["cat"]);
        idx.insert_document(1, c1, n1, meta());
        let (c2, n2) = counts(&["cat", "dog"]);
        idx.insert_document(2, c2, n2, meta());

        idx.remove_document(1);
        assert!(idx.inverted.contains_key("cat"));
        idx.remove_document(2);
        assert!(!idx.inverted.contains_key("cat"));
        assert!(!idx.inverted.contains_key("dog"));
    }

    #[test]
    fn zero_token_document_is_registered_with_no_postings() {
        let mut idx = Index::new();
        idx.insert_document(7, HashMap::new(), 0, meta());
        assert!(idx.contains(7));
        assert_eq!(idx.forward.get(&7).unwrap().len(), 0);
    }

    #[test]
    fn term_frequencies_sum_to_one() {
        let mut idx = Index::new();
        let (c, n) = counts(&["cat", "in", "the", "city"]);
        idx.insert_document(1, c, n, meta());
        let sum: f64 = idx.forward[&1].values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn remove_document_parallel_matches_sequential() {
        let mut seq = Index::new();
        let mut par = Index::new();
        for idx in [&mut seq, &mut par] {
            let (c1, n1) = counts(&["cat", "dog"]);
            idx.insert_document(1, c1, n1, meta());
            let (c2, n2) = counts(&["cat"]);
            idx.insert_document(2, c2, n2, meta());
        }

        seq.remove_document(1);
        par.remove_document_parallel(1);

        assert_eq!(seq.inverted.contains_key("dog"), par.inverted.contains_key("dog"));
        assert_eq!(seq.inverted["cat"].len(), par.inverted["cat"].len());
        assert_eq!(seq.doc_ids, par.doc_ids);
    }
}
