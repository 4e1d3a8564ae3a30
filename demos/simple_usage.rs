/// A short tour of SearchServer: add documents, run a query, inspect a
/// match, and remove a document.
use tfidx::core::types::DocumentStatus;
use tfidx::{Policy, SearchServer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = SearchServer::from_stop_words_str("and in the on")?;

    server.add_document(1, "a colorful parrot with green wings", DocumentStatus::Actual, &[8, 9, 10])?;
    server.add_document(2, "a grey crow on the roof", DocumentStatus::Actual, &[1, 2, 3])?;
    server.add_document(3, "the crow and the parrot share a nest", DocumentStatus::Actual, &[5, 5, 5])?;

    println!("documents indexed: {}", server.get_document_count());

    let hits = server.find_top_documents_actual("parrot crow -roof", Policy::Sequential)?;
    for doc in &hits {
        println!("doc {} relevance {:.4} rating {}", doc.id, doc.relevance, doc.rating);
    }

    let (words, status) = server.match_document("parrot crow", Policy::Sequential, 3)?;
    println!("document 3 ({status:?}) matched: {words:?}");

    server.remove_document(2);
    println!("documents after removal: {}", server.get_document_count());

    Ok(())
}
