use std::collections::VecDeque;

use crate::core::error::Result;
use crate::core::types::Document;
use crate::search::server::{Policy, SearchServer};

const MINUTES_IN_DAY: usize = 1440;

struct QueryResult {
    had_results: bool,
}

/// Wraps `find_top_documents`, remembering whether each of the last
/// `MINUTES_IN_DAY` calls returned at least one hit. Models one query per
/// minute, as the original's `AddFindRequest` does.
pub struct RequestQueue<'s> {
    server: &'s SearchServer,
    history: VecDeque<QueryResult>,
    no_result_count: usize,
}

impl<'s> RequestQueue<'s> {
    pub fn new(server: &'s SearchServer) -> Self {
        RequestQueue {
            server,
            history: VecDeque::with_capacity(MINUTES_IN_DAY),
            no_result_count: 0,
        }
    }

    pub fn add_find_request(&mut self, raw_query: &str, policy: Policy) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents_actual(raw_query, policy)?;
        self.record(result.is_empty());
        Ok(result)
    }

    fn record(&mut self, had_no_results: bool) {
        if self.history.len() == MINUTES_IN_DAY {
            if let Some(evicted) = self.history.pop_front() {
                if !evicted.had_results {
                    self.no_result_count -= 1;
                }
            }
        }
        if had_no_results {
            self.no_result_count += 1;
        }
        self.history.push_back(QueryResult {
            had_results: !had_no_results,
        });
    }

    /// Number of requests, within the trailing `MINUTES_IN_DAY`-request
    /// window, that returned no results.
    pub fn get_no_result_requests(&self) -> usize {
        self.no_result_count
    }
}
