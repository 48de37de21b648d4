use crate::error::{Error, Result};
use crate::hash::{DigestAlgorithm, DigestHashKernels, HashKernels};

/// Upper bound on the bit array allocation, in bytes, unless overridden.
pub const DEFAULT_MEMORY_BUDGET: usize = 64 * 1024 * 1024;

/// Three bytes per hash over MD5: five indices into 2^24 bits.
pub const DEFAULT_BYTES_PER_HASH: usize = 3;

/// Fixed parameters of a filter instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterConfig {
    pub algorithm: DigestAlgorithm,
    pub bytes_per_hash: usize,
    /// Largest bit array, in bytes, the filter is allowed to allocate.
    pub memory_budget: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            algorithm: DigestAlgorithm::default(),
            bytes_per_hash: DEFAULT_BYTES_PER_HASH,
            memory_budget: DEFAULT_MEMORY_BUDGET,
        }
    }
}

impl FilterConfig {
    pub fn new(algorithm: DigestAlgorithm, bytes_per_hash: usize) -> Self {
        Self {
            algorithm,
            bytes_per_hash,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_bytes_per_hash(mut self, bytes_per_hash: usize) -> Self {
        self.bytes_per_hash = bytes_per_hash;
        self
    }

    pub fn with_memory_budget(mut self, memory_budget: usize) -> Self {
        self.memory_budget = memory_budget;
        self
    }

    /// Checks the configuration and builds the hash kernels it describes.
    pub fn validate(&self) -> Result<DigestHashKernels> {
        let kernels = DigestHashKernels::new(self.algorithm, self.bytes_per_hash)?;
        let bytes = kernels.index_space() / 8;
        if bytes > self.memory_budget {
            return Err(Error::invalid_configuration(format!(
                "{} bytes per hash needs {} bytes of bits, over the {} byte budget",
                self.bytes_per_hash, bytes, self.memory_budget
            )));
        }
        Ok(kernels)
    }
}
