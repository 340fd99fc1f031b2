// Criterion benchmarks for Companion Matcher

use companion_matcher::core::{normalize_query, similarity::match_breed, Matcher, HEURISTIC_THRESHOLDS};
use companion_matcher::models::{AgeValue, TraitQuery};
use companion_matcher::services::generate_demo_dogs_with;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;

fn create_query() -> TraitQuery {
    TraitQuery {
        breed: Some("Retriever".to_string()),
        size: Some("Large".to_string()),
        color: Some("Black".to_string()),
        age: Some(AgeValue::from("Young")),
        temperament: Some("friendly".to_string()),
        good_with_kids: Some(true),
        house_trained: true,
        search_text: Some("playful loyal companion for hiking".to_string()),
        ..Default::default()
    }
}

fn bench_breed_similarity(c: &mut Criterion) {
    c.bench_function("match_breed", |b| {
        b.iter(|| {
            match_breed(
                black_box("golden doodle"),
                black_box("Golden Retriever"),
                black_box(Some("Poodle")),
                &HEURISTIC_THRESHOLDS,
            )
        });
    });
}

fn bench_query_normalization(c: &mut Criterion) {
    let raw = json!({
        "breed": "lab",
        "size": "Large",
        "age": "2",
        "furColor": "yellow",
        "goodWithKids": "true",
        "searchText": "calm apartment dog"
    });

    c.bench_function("normalize_query", |b| {
        b.iter(|| normalize_query(black_box(&raw)))
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let query = create_query();

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates = generate_demo_dogs_with(&mut StdRng::seed_from_u64(42), *candidate_count);

        group.bench_with_input(
            BenchmarkId::new("find_matches", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.find_matches(black_box(&query), black_box(candidates.clone())));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_breed_similarity,
    bench_query_normalization,
    bench_matching
);

criterion_main!(benches);
