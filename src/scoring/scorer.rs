use crate::core::types::Document;

/// `ln(total_docs / docs_containing_word)`.
pub fn inverse_document_frequency(total_docs: usize, docs_with_word: usize) -> f64 {
    (total_docs as f64 / docs_with_word as f64).ln()
}

/// Two relevances are equal when their absolute difference is within this
/// tolerance. Standardized on an absolute threshold rather than the
/// relative `DBL_EPSILON` variant the original source uses inconsistently.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Composite order: relevance descending, ties (within `RELEVANCE_EPSILON`)
/// broken by rating descending. Stable on insertion order beyond that.
pub fn compare_documents(a: &Document, b: &Document) -> std::cmp::Ordering {
    if (a.relevance - b.relevance).abs() <= RELEVANCE_EPSILON {
        b.rating.cmp(&a.rating)
    } else {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// Sorts `documents` by the composite order and truncates to `max_results`.
pub fn rank(mut documents: Vec<Document>, max_results: usize) -> Vec<Document> {
    documents.sort_by(compare_documents);
    documents.truncate(max_results);
    documents
}

/// Parallel variant of [`rank`]: same ordering, sorted with a data-parallel
/// sort. Cosmetic at the corpus sizes this crate targets, but keeps the
/// parallel path from funnelling through a sequential sort.
pub fn rank_parallel(mut documents: Vec<Document>, max_results: usize) -> Vec<Document> {
    use rayon::slice::ParallelSliceMut;
    documents.par_sort_by(compare_documents);
    documents.truncate(max_results);
    documents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_matches_natural_log_ratio() {
        let idf = inverse_document_frequency(2, 1);
        assert!((idf - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn ranking_orders_by_relevance_then_rating() {
        let docs = vec![
            Document::new(1, 0.5, 1),
            Document::new(2, 0.9, 1),
            Document::new(3, 0.5, 9),
        ];
        let ranked = rank(docs, 5);
        assert_eq!(ranked[0].id, 2);
        assert_eq!(ranked[1].id, 3);
        assert_eq!(ranked[2].id, 1);
    }

    #[test]
    fn near_equal_relevances_tie_break_on_rating() {
        let docs = vec![
            Document::new(1, 0.17328679, 2),
            Document::new(2, 0.17328680, 9),
        ];
        let ranked = rank(docs, 5);
        assert_eq!(ranked[0].id, 2);
    }

    #[test]
    fn truncates_to_max_results() {
        let docs: Vec<Document> = (0..10).map(|i| Document::new(i, i as f64, 0)).collect();
        assert_eq!(rank(docs, 5).len(), 5);
    }

    #[test]
    fn parallel_rank_matches_sequential() {
        let docs: Vec<Document> = vec![
            Document::new(1, 0.1, 3),
            Document::new(2, 0.9, 1),
            Document::new(3, 0.9, 5),
            Document::new(4, 0.5, 0),
        ];
        let seq = rank(docs.clone(), 5);
        let par = rank_parallel(docs, 5);
        assert_eq!(seq, par);
    }
}
