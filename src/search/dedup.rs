use std::collections::{BTreeSet, HashMap};

use tracing::info;

use crate::search::server::SearchServer;

/// Removes documents whose non-stop word set exactly duplicates an
/// earlier document's. Among each group of duplicates the lowest id is
/// kept; the rest are removed and returned in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<i32> {
    let mut seen: HashMap<BTreeSet<String>, i32> = HashMap::new();
    let mut to_remove: Vec<i32> = Vec::new();

    for id in server.doc_ids() {
        let signature: BTreeSet<String> = server.get_word_frequencies(id).into_keys().collect();
        match seen.get(&signature) {
            Some(_) => to_remove.push(id),
            None => {
                seen.insert(signature, id);
            }
        }
    }

    to_remove.sort_unstable();
    for &id in &to_remove {
        server.remove_document(id);
        info!(document_id = id, "removed duplicate document");
    }
    to_remove
}
