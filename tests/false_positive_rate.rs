use rand::rngs::StdRng;
use rand::SeedableRng;
use spell_bloom::{
    dictionary, expected_false_positive_rate, BloomFilter, DigestAlgorithm, Evaluator, Filter, FilterConfig, WordSet,
};
use std::io::Cursor;

fn dictionary_of(n: usize) -> String {
    (0..n).map(|i| format!("entry{}\n", i)).collect()
}

#[test]
fn scenario() {
    let mut filter = Filter::new(&FilterConfig::default()).unwrap();
    let truth = dictionary::load(&mut filter, Cursor::new("the\nquick\nbrown\nfox\n")).unwrap();
    assert_eq!(4, truth.len());
    assert!(filter.may_contain("the"));
    assert!(filter.may_contain("fox"));
    // probabilistic: 20 bits out of 2^24 are set
    assert!(!filter.may_contain("zzzzz"));
}

#[test]
fn md5_three_bytes_per_hash_matches_theory() {
    let n = 1_000_000;
    let mut filter = Filter::new(&FilterConfig::new(DigestAlgorithm::Md5, 3)).unwrap();
    assert_eq!(5, filter.hash_count());
    assert_eq!(16_777_216, filter.bit_count());

    let truth = dictionary::load(&mut filter, Cursor::new(dictionary_of(n))).unwrap();
    assert_eq!(n, truth.len());
    assert!(truth.iter().all(|w| filter.may_contain(w)));

    let expected = expected_false_positive_rate(5, n, 1 << 24);
    let report = Evaluator::new(200_000, 8).evaluate(&filter, &truth, &mut StdRng::seed_from_u64(2024));
    assert_eq!(0, report.true_positives);
    assert!(
        report.rate() > expected / 2.0 && report.rate() < expected * 2.0,
        "measured {} expected {}",
        report.rate(),
        expected
    );
    // the fill ratio predicts the same rate
    let estimated = filter.estimated_false_positive_rate();
    assert!((estimated - expected).abs() / expected < 0.05, "{} vs {}", estimated, expected);
}

#[test]
fn saved_filter_answers_identically() {
    let config = FilterConfig::new(DigestAlgorithm::Sha256, 2);
    let mut filter = Filter::new(&config).unwrap();
    let truth = dictionary::load(&mut filter, Cursor::new(dictionary_of(5_000))).unwrap();

    let tmp = tempfile::NamedTempFile::new().unwrap();
    filter.write_to(tmp.reopen().unwrap()).unwrap();
    let restored = Filter::read_from(tmp.reopen().unwrap(), &config).unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    let queries: Vec<String> = truth
        .iter()
        .take(500)
        .cloned()
        .chain((0..2_000).map(|_| spell_bloom::evaluator::random_word(&mut rng, 4)))
        .collect();
    for word in &queries {
        assert_eq!(filter.may_contain(word), restored.may_contain(word), "{}", word);
    }
    let absent: WordSet = WordSet::new();
    let before = Evaluator::new(1_000, 4).evaluate(&filter, &absent, &mut StdRng::seed_from_u64(9));
    let after = Evaluator::new(1_000, 4).evaluate(&restored, &absent, &mut StdRng::seed_from_u64(9));
    assert_eq!(before, after);
}
