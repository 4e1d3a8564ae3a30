use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use tfidx::core::types::DocumentStatus;
use tfidx::{Policy, SearchServer};

fn random_document(rng: &mut impl Rng, word_count: usize) -> String {
    let vocabulary = [
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "cat", "bird",
    ];
    (0..word_count)
        .map(|_| vocabulary[rng.gen_range(0..vocabulary.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn populated_server(doc_count: usize) -> SearchServer {
    let mut rng = rand::thread_rng();
    let mut server = SearchServer::from_stop_words_str("the over").unwrap();
    for id in 0..doc_count {
        let text = random_document(&mut rng, 50);
        server
            .add_document(id as i32, &text, DocumentStatus::Actual, &[1, 2, 3])
            .unwrap();
    }
    server
}

fn bench_add_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_document");
    for doc_count in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(doc_count), &doc_count, |b, &doc_count| {
            b.iter(|| {
                let mut server = SearchServer::from_stop_words_str("the over").unwrap();
                let mut rng = rand::thread_rng();
                for id in 0..doc_count {
                    let text = random_document(&mut rng, 50);
                    server
                        .add_document(id as i32, &text, DocumentStatus::Actual, &[1, 2, 3])
                        .unwrap();
                }
                black_box(server.get_document_count());
            });
        });
    }
    group.finish();
}

fn bench_find_top_documents(c: &mut Criterion) {
    let server = populated_server(10_000);
    let mut group = c.benchmark_group("find_top_documents");

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(server.find_top_documents_actual("quick fox -lazy", Policy::Sequential).unwrap()));
    });
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(server.find_top_documents_actual("quick fox -lazy", Policy::Parallel).unwrap()));
    });
    group.finish();
}

criterion_group!(benches, bench_add_document, bench_find_top_documents);
criterion_main!(benches);
