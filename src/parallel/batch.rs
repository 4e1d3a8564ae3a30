use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::types::Document;
use crate::search::server::{Policy, SearchServer};

/// Runs every query in `raw_queries` against `server`, each one scored with
/// its own sequential execution internally but distributed across the
/// available threads. Output preserves the input order: `result[i]`
/// corresponds to `raw_queries[i]`.
pub fn process_queries(server: &SearchServer, raw_queries: &[&str]) -> Vec<Result<Vec<Document>>> {
    raw_queries
        .par_iter()
        .map(|&q| server.find_top_documents_actual(q, Policy::Sequential))
        .collect()
}

/// Flattened variant of [`process_queries`]: concatenates every query's
/// results in order, so that all of query 0's hits (already ranked)
/// precede all of query 1's, and so on. A query that errors contributes no
/// documents to the flattened stream.
pub fn process_queries_joined(server: &SearchServer, raw_queries: &[&str]) -> Vec<Document> {
    process_queries(server, raw_queries)
        .into_iter()
        .flat_map(|r| r.unwrap_or_default())
        .collect()
}
