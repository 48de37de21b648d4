use crate::error::{Error, Result};
use md5::Md5;
use sha2::{Digest, Sha256};
use std::fmt;
use std::mem::size_of;

/// A trait for deriving the bit indices of a word.
pub trait HashKernels {
    type HI: Iterator<Item = usize>;

    fn hash_iter(&self, word: &[u8]) -> Self::HI;

    /// Number of indices yielded per word, k.
    fn hash_count(&self) -> usize;

    /// Exclusive upper bound of every yielded index, m.
    fn index_space(&self) -> usize;
}

/// Digest functions a filter can slice its indices from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DigestAlgorithm {
    Md5,
    Sha256,
}

impl DigestAlgorithm {
    /// Stable identifier written into serialized filters.
    pub const fn id(self) -> u8 {
        match self {
            DigestAlgorithm::Md5 => 1,
            DigestAlgorithm::Sha256 => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(DigestAlgorithm::Md5),
            2 => Some(DigestAlgorithm::Sha256),
            _ => None,
        }
    }

    /// Digest length in bytes.
    pub const fn digest_len(self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha256 => 32,
        }
    }

    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Md5 => Md5::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        }
    }
}

impl Default for DigestAlgorithm {
    fn default() -> Self {
        DigestAlgorithm::Md5
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestAlgorithm::Md5 => write!(f, "md5"),
            DigestAlgorithm::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Number of whole `bytes_per_hash` windows in a digest of `digest_len` bytes.
pub fn compute_k_num(digest_len: usize, bytes_per_hash: usize) -> usize {
    assert!(bytes_per_hash > 0);
    digest_len / bytes_per_hash
}

/// Size of the index space addressable by a `bytes_per_hash` big-endian
/// integer, or `None` when it does not fit in a `usize`.
pub fn compute_m_num(bytes_per_hash: usize) -> Option<usize> {
    if bytes_per_hash == 0 || bytes_per_hash >= size_of::<usize>() {
        return None;
    }
    Some(1usize << (8 * bytes_per_hash))
}

/// Splits a single digest of the word into `k` big-endian windows of
/// `bytes_per_hash` bytes each. Trailing bytes that do not fill a whole
/// window are dropped. Windows are not deduplicated, so two equal windows set
/// or test the same bit twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigestHashKernels {
    algorithm: DigestAlgorithm,
    bytes_per_hash: usize,
    k: usize, // windows per digest
    m: usize, // index space
}

impl DigestHashKernels {
    pub fn new(algorithm: DigestAlgorithm, bytes_per_hash: usize) -> Result<Self> {
        if bytes_per_hash == 0 {
            return Err(Error::invalid_configuration("bytes per hash must be positive"));
        }
        if bytes_per_hash > algorithm.digest_len() {
            return Err(Error::invalid_configuration(format!(
                "bytes per hash {} exceeds the {}-byte {} digest",
                bytes_per_hash,
                algorithm.digest_len(),
                algorithm
            )));
        }
        let m = compute_m_num(bytes_per_hash).ok_or_else(|| {
            Error::invalid_configuration(format!("2^{} bits is not addressable", 8 * bytes_per_hash))
        })?;

        Ok(Self {
            algorithm,
            bytes_per_hash,
            k: compute_k_num(algorithm.digest_len(), bytes_per_hash),
            m,
        })
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    pub fn bytes_per_hash(&self) -> usize {
        self.bytes_per_hash
    }
}

impl HashKernels for DigestHashKernels {
    type HI = DigestHashIter;

    fn hash_iter(&self, word: &[u8]) -> Self::HI {
        DigestHashIter::new(self.algorithm.digest(word), self.bytes_per_hash)
    }

    fn hash_count(&self) -> usize {
        self.k
    }

    fn index_space(&self) -> usize {
        self.m
    }
}

pub struct DigestHashIter {
    digest: Vec<u8>,
    bytes_per_hash: usize,
    offset: usize,
}

impl DigestHashIter {
    fn new(digest: Vec<u8>, bytes_per_hash: usize) -> Self {
        Self {
            digest,
            bytes_per_hash,
            offset: 0,
        }
    }

    fn remaining(&self) -> usize {
        (self.digest.len() - self.offset) / self.bytes_per_hash
    }
}

impl Iterator for DigestHashIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let end = self.offset + self.bytes_per_hash;
        if end > self.digest.len() {
            return None;
        }
        let index = self.digest[self.offset..end]
            .iter()
            .fold(0usize, |acc, &byte| (acc << 8) | byte as usize);
        self.offset = end;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DigestHashIter {}
