// Retrieval and leave-one-out benchmarks over synthetic symptom corpora
use cbrx::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

const VOCABULARY_SIZE: usize = 132;
const LABELS: usize = 41;

fn generate_random_features(rng: &mut StdRng) -> FeatureSet {
    let count = rng.random_range(3..12);
    (0..count)
        .map(|_| format!("symptom_{}", rng.random_range(0..VOCABULARY_SIZE)))
        .collect()
}

fn generate_corpus(size: usize) -> Vec<Case> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..size)
        .map(|i| {
            let features = generate_random_features(&mut rng);
            Case::new(i as u64, features, format!("disease_{}", i % LABELS))
        })
        .collect()
}

fn benchmark_weights(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_weights");

    for size in [1000, 5000].iter() {
        let corpus = generate_corpus(*size);
        group.bench_with_input(BenchmarkId::new("idf", size), &corpus, |b, corpus| {
            b.iter(|| black_box(compute_weights(black_box(corpus))));
        });
    }

    group.finish();
}

fn benchmark_retrieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("retrieve");

    let corpus = generate_corpus(5000);
    let weighting = Weighting::from(compute_weights(&corpus));
    let base = CaseBase::new(corpus).unwrap();
    let query = generate_random_features(&mut StdRng::seed_from_u64(7));

    for (name, weighting) in [("uniform", Weighting::Uniform), ("idf", weighting)] {
        let retriever = Retriever::new(weighting);
        group.bench_function(name, |b| {
            b.iter(|| black_box(retriever.retrieve(black_box(&query), &base, 10).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_loo(c: &mut Criterion) {
    let mut group = c.benchmark_group("leave_one_out");
    group.sample_size(10);

    let corpus = generate_corpus(1000);
    let weighting = Weighting::from(compute_weights(&corpus));
    let base = CaseBase::new(corpus).unwrap();

    for parallel in [false, true] {
        let evaluator = LooEvaluator::new(weighting.clone(), EvalConfig { parallel });
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            b.iter(|| black_box(evaluator.evaluate(&base)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_weights, benchmark_retrieve, benchmark_loo);
criterion_main!(benches);
