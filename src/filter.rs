use crate::bits::BitArray;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::hash::{DigestHashKernels, HashKernels};
use crate::BloomFilter;
use tracing::debug;

/// A Bloom filter over words, owning its bit array exclusively.
///
/// Filling happens through `add`, which needs `&mut self`; once loading is
/// done the filter can be shared by reference and queried from many threads.
#[derive(Debug)]
pub struct Filter<HK: HashKernels = DigestHashKernels> {
    bits: BitArray,   // filter data
    hash_kernels: HK, // index derivation
}

impl Filter {
    /// Create an empty filter with m = 2^(8 * bytes_per_hash) bits.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let hash_kernels = config.validate()?;
        debug!(
            algorithm = %config.algorithm,
            bytes_per_hash = config.bytes_per_hash,
            k = hash_kernels.hash_count(),
            m = hash_kernels.index_space(),
            "creating bloom filter"
        );
        Ok(Self::with_hash_kernels(hash_kernels))
    }

    pub fn config(&self) -> FilterConfig {
        FilterConfig::new(self.hash_kernels.algorithm(), self.hash_kernels.bytes_per_hash())
    }
}

impl<HK: HashKernels> Filter<HK> {
    pub fn with_hash_kernels(hash_kernels: HK) -> Self {
        let bits = BitArray::new(hash_kernels.index_space());
        Self { bits, hash_kernels }
    }

    pub(crate) fn from_parts(bits: BitArray, hash_kernels: HK) -> Self {
        assert_eq!(bits.len(), hash_kernels.index_space());
        Self { bits, hash_kernels }
    }

    pub fn bits(&self) -> &BitArray {
        &self.bits
    }

    pub fn hash_kernels(&self) -> &HK {
        &self.hash_kernels
    }

    pub fn hash_count(&self) -> usize {
        self.hash_kernels.hash_count()
    }

    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Fraction of bits currently set.
    pub fn fill_ratio(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Probability that a word never added hits only set bits, given the
    /// current fill ratio.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powi(self.hash_count() as i32)
    }
}

impl<HK: HashKernels> BloomFilter for Filter<HK> {
    fn add(&mut self, word: &str) {
        let bits = &mut self.bits;
        self.hash_kernels.hash_iter(word.as_bytes()).for_each(|i| bits.set(i))
    }

    fn may_contain(&self, word: &str) -> bool {
        self.hash_kernels.hash_iter(word.as_bytes()).all(|i| self.bits.get(i))
    }
}
