use criterion::{criterion_group, criterion_main, Criterion};
use rand::thread_rng;
use spell_bloom::evaluator::random_word;
use spell_bloom::{expected_false_positive_rate, BloomFilter, DigestAlgorithm, Evaluator, Filter, FilterConfig, WordSet};

// This is an empty bench, only print false positives rate
fn bench(c: &mut Criterion) {
    for &n in &[1_000, 4_000, 8_000] {
        let mut filter = Filter::new(&FilterConfig::new(DigestAlgorithm::Md5, 2)).unwrap();
        let truth: WordSet = (0..n).map(|_| random_word(&mut thread_rng(), 8)).collect();
        truth.iter().for_each(|w| filter.add(w));
        let report = Evaluator::new(100_000, 5).evaluate(&filter, &truth, &mut thread_rng());
        println!(
            "md5/2 with {} words: {} (expected {:.4}%)",
            truth.len(),
            report,
            expected_false_positive_rate(filter.hash_count(), truth.len(), filter.bit_count()) * 100.0
        );
    }

    c.bench_function("false_positives_rate", |b| b.iter(|| {}));
}

criterion_group!(benches, bench);
criterion_main!(benches);
