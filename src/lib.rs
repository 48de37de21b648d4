//! A Bloom filter spell checker.
//!
//! Each word is hashed once; the digest is cut into `k` big-endian windows of
//! `bytes_per_hash` bytes and every window addresses one bit of a
//! `2^(8 * bytes_per_hash)` bit array. With the default MD5 and three bytes
//! per hash that is five indices into 16,777,216 bits.
//!
//! ```
//! use spell_bloom::{BloomFilter, Filter, FilterConfig};
//!
//! let mut filter = Filter::new(&FilterConfig::default()).unwrap();
//! for word in "the quick brown fox".split_whitespace() {
//!     filter.add(word);
//! }
//! assert!(filter.may_contain("fox"));
//! ```

pub mod bits;
pub mod codec;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod hash;

pub use bits::BitArray;
pub use config::FilterConfig;
pub use dictionary::WordSet;
pub use error::{Error, Result};
pub use evaluator::{Evaluator, Report};
pub use filter::Filter;
pub use hash::{DigestAlgorithm, DigestHashKernels, HashKernels};

pub trait BloomFilter {
    /// Records `word`. Adding the same word again leaves the filter unchanged.
    ///
    /// The empty word is hashed like any other and always maps to the same
    /// indices.
    fn add(&mut self, word: &str);

    /// `false` means `word` was never added; `true` means it possibly was.
    fn may_contain(&self, word: &str) -> bool;
}

// Approximate false positive probability after n distinct words were added
// to an m bit filter using k indices per word: (1 - e^(-kn/m))^k.
pub fn expected_false_positive_rate(k: usize, n: usize, m: usize) -> f64 {
    assert!(m > 0);
    let fill = 1.0 - (-(k as f64) * (n as f64) / (m as f64)).exp();
    fill.powi(k as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_rate() {
        assert_eq!(0.0, expected_false_positive_rate(5, 0, 1 << 24));
        let rate = expected_false_positive_rate(5, 1_000_000, 1 << 24);
        assert!((rate - 0.001_137).abs() < 1e-5, "{}", rate);
        let rate = expected_false_positive_rate(8, 8_000, 1 << 16);
        assert!((rate - 0.0228).abs() < 5e-4, "{}", rate);
    }
}
