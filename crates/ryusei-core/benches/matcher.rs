use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ryusei_core::graph::build_reading_graph;
use ryusei_core::matcher::KeyMatcher;
use ryusei_core::romaji::KanaTable;
use ryusei_core::vocab::Vocabulary;

fn bench_submit_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_key");
    for (reading, keys) in [
        ("かんじ", "kanji"),
        ("しゃしん", "shashinn"),
        ("ちょっと", "chotto"),
        ("ぎゅうにゅう", "gyuunyuu"),
    ] {
        let graph = Arc::new(build_reading_graph(reading, KanaTable::global()).unwrap());
        group.bench_with_input(BenchmarkId::from_parameter(keys), &keys, |b, keys| {
            b.iter(|| {
                let mut m = KeyMatcher::new(Arc::clone(&graph));
                for key in keys.chars() {
                    m.submit_key(key);
                }
                m.is_complete()
            });
        });
    }
    group.finish();
}

fn bench_rejected_key(c: &mut Criterion) {
    let graph = Arc::new(build_reading_graph("しゃしん", KanaTable::global()).unwrap());
    let mut m = KeyMatcher::new(graph);
    m.submit_key('s');
    c.bench_function("rejected_key", |b| b.iter(|| m.submit_key('q')));
}

fn bench_build_vocab(c: &mut Criterion) {
    c.bench_function("build_default_vocab", |b| {
        b.iter(|| Vocabulary::default_embedded().unwrap().len())
    });
}

criterion_group!(benches, bench_submit_key, bench_rejected_key, bench_build_vocab);
criterion_main!(benches);
