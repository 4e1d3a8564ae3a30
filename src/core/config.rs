/// Tunables for a `SearchServer` instance.
#[derive(Debug, Clone, Copy)]
pub struct SearchServerConfig {
    /// Maximum number of hits `find_top_documents` ever returns.
    pub max_results: usize,
    /// Number of shards in the concurrent accumulator used by the parallel
    /// scoring path.
    pub shard_count: usize,
}

impl Default for SearchServerConfig {
    fn default() -> Self {
        SearchServerConfig {
            max_results: 5,
            shard_count: 8,
        }
    }
}
