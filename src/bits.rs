use crate::error::{Error, Result};
use std::mem::size_of;

type Word = usize;
const BYTES_PER_WORD: usize = size_of::<Word>();
const BITS_PER_WORD: usize = BYTES_PER_WORD * 8;

/// Fixed-length array of single-bit flags. Bits can be set but never
/// cleared.
#[derive(Debug, PartialEq, Eq)]
pub struct BitArray {
    data: Vec<Word>,
    len: usize,
}

impl BitArray {
    /// Creates a new BitArray with `len` bits, all unset.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0; words_for(len)],
            len,
        }
    }

    /// Rebuilds a BitArray of `len` bits from packed bytes, bit `i` being
    /// bit `i % 8` of byte `i / 8`.
    pub fn from_bytes(len: usize, raw_data: &[u8]) -> Result<Self> {
        let expected = bytes_for(len);
        if raw_data.len() != expected {
            return Err(Error::invalid_data(format!(
                "expected {} bytes of bit data, got {}",
                expected,
                raw_data.len()
            )));
        }
        if len % 8 != 0 {
            if let Some(&last) = raw_data.last() {
                if last >> (len % 8) != 0 {
                    return Err(Error::invalid_data("bits set beyond the array length"));
                }
            }
        }

        let data = raw_data
            .chunks(BYTES_PER_WORD)
            .map(|chunk| {
                let mut buf = [0u8; BYTES_PER_WORD];
                buf[..chunk.len()].copy_from_slice(chunk);
                Word::from_le_bytes(buf)
            })
            .collect::<Vec<_>>();
        Ok(Self { data, len })
    }

    /// Packs the bits into `ceil(len / 8)` bytes, least significant bit first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.data.len() * BYTES_PER_WORD);
        for word in &self.data {
            result.extend_from_slice(&word.to_le_bytes());
        }
        result.truncate(bytes_for(self.len));
        result
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Sets the bit at `index`. Setting an already set bit is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "bit index {} out of range for {} bits", index, self.len);
        self.data[index / BITS_PER_WORD] |= bit_mask(index);
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {} out of range for {} bits", index, self.len);
        self.data[index / BITS_PER_WORD] & bit_mask(index) != 0
    }
}

#[inline(always)]
fn bit_mask(index: usize) -> Word {
    1 << (index % BITS_PER_WORD)
}

fn words_for(len: usize) -> usize {
    (len + BITS_PER_WORD - 1) / BITS_PER_WORD
}

fn bytes_for(len: usize) -> usize {
    (len + 7) / 8
}
