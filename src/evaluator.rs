//! Empirical false positive measurement with random words.

use crate::dictionary::WordSet;
use crate::BloomFilter;
use rand::Rng;
use std::fmt;
use tracing::info;

pub const DEFAULT_SAMPLES: usize = 1000;
pub const DEFAULT_WORD_LENGTH: usize = 5;

/// A word of `length` lowercase ASCII letters, each drawn uniformly.
pub fn random_word<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length).map(|_| char::from(rng.gen_range(b'a'..=b'z'))).collect()
}

#[derive(Clone, Copy, Debug)]
pub struct Evaluator {
    samples: usize,
    word_length: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES, DEFAULT_WORD_LENGTH)
    }
}

impl Evaluator {
    pub fn new(samples: usize, word_length: usize) -> Self {
        Self { samples, word_length }
    }

    /// Queries `samples` random words against `filter` and classifies every
    /// positive answer with `ground_truth`. The filter is only read.
    pub fn evaluate<F, R>(&self, filter: &F, ground_truth: &WordSet, rng: &mut R) -> Report
    where
        F: BloomFilter + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = Report {
            samples: self.samples,
            ..Report::default()
        };
        for _ in 0..self.samples {
            let word = random_word(rng, self.word_length);
            if !filter.may_contain(&word) {
                continue;
            }
            if ground_truth.contains(&word) {
                report.true_positives += 1;
            } else {
                report.false_positives += 1;
            }
        }
        info!(
            samples = report.samples,
            false_positives = report.false_positives,
            true_positives = report.true_positives,
            "evaluated false positive rate"
        );
        report
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub samples: usize,
    pub false_positives: usize,
    /// Random words that really were in the dictionary.
    pub true_positives: usize,
}

impl Report {
    pub fn rate(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.false_positives as f64 / self.samples as f64
    }

    pub fn percentage(&self) -> f64 {
        self.rate() * 100.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} false positives ({:.2}%)",
            self.false_positives,
            self.samples,
            self.percentage()
        )
    }
}
