//! Binary persistence of a [`Filter`].
//!
//! Layout, integers little-endian:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 4 | magic `SPBF` |
//! | 4 | 1 | serial version |
//! | 5 | 1 | digest algorithm id |
//! | 6 | 1 | bytes per hash |
//! | 7 | 1 | reserved, zero |
//! | 8 | 8 | bit count m |
//! | 16 | ceil(m / 8) | bits, least significant bit first |

use crate::bits::BitArray;
use crate::config::FilterConfig;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::hash::{DigestAlgorithm, HashKernels};
use byteorder::{ByteOrder, LittleEndian as LE, ReadBytesExt};
use std::io::{self, Cursor, Read, Write};
use tracing::debug;

pub const MAGIC: [u8; 4] = *b"SPBF";
pub const SERIAL_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 16;

impl Filter {
    pub fn serialize(&self) -> Vec<u8> {
        let bits = self.bits().to_bytes();
        let mut out = Vec::with_capacity(HEADER_LEN + bits.len());
        out.extend_from_slice(&self.header());
        out.extend_from_slice(&bits);
        out
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.header())?;
        writer.write_all(&self.bits().to_bytes())?;
        Ok(())
    }

    fn header(&self) -> [u8; HEADER_LEN] {
        let kernels = self.hash_kernels();
        let mut header = [0u8; HEADER_LEN];
        header[..4].copy_from_slice(&MAGIC);
        header[4] = SERIAL_VERSION;
        header[5] = kernels.algorithm().id();
        header[6] = kernels.bytes_per_hash() as u8;
        LE::write_u64(&mut header[8..], self.bit_count() as u64);
        header
    }

    /// Decodes a filter that must have been built with the algorithm and
    /// bytes per hash of `expected`.
    pub fn deserialize(bytes: &[u8], expected: &FilterConfig) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let filter = Self::read_from(&mut cursor, expected)?;
        let trailing = bytes.len() as u64 - cursor.position();
        if trailing != 0 {
            return Err(Error::invalid_data(format!("{} trailing bytes after filter data", trailing)));
        }
        Ok(filter)
    }

    pub fn read_from<R: Read>(mut reader: R, expected: &FilterConfig) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(truncated)?;
        if magic != MAGIC {
            return Err(Error::invalid_data(format!("bad magic {:02x?}", magic)));
        }
        let version = reader.read_u8().map_err(truncated)?;
        if version != SERIAL_VERSION {
            return Err(Error::invalid_data(format!(
                "unsupported serial version: expected {}, got {}",
                SERIAL_VERSION, version
            )));
        }

        let algorithm_id = reader.read_u8().map_err(truncated)?;
        let algorithm = DigestAlgorithm::from_id(algorithm_id)
            .ok_or_else(|| Error::invalid_data(format!("unknown digest algorithm id {}", algorithm_id)))?;
        if algorithm != expected.algorithm {
            return Err(Error::incompatible("digest algorithm", expected.algorithm, algorithm));
        }
        let bytes_per_hash = reader.read_u8().map_err(truncated)? as usize;
        if bytes_per_hash != expected.bytes_per_hash {
            return Err(Error::incompatible("bytes per hash", expected.bytes_per_hash, bytes_per_hash));
        }
        if reader.read_u8().map_err(truncated)? != 0 {
            return Err(Error::invalid_data("reserved header byte is not zero"));
        }

        let kernels = expected.validate()?;
        let m = reader.read_u64::<LE>().map_err(truncated)?;
        if m != kernels.index_space() as u64 {
            return Err(Error::invalid_data(format!(
                "bit count {} does not match 2^{}",
                m,
                8 * bytes_per_hash
            )));
        }

        let mut raw_data = vec![0u8; (kernels.index_space() + 7) / 8];
        reader.read_exact(&mut raw_data).map_err(truncated)?;
        let bits = BitArray::from_bytes(kernels.index_space(), &raw_data)?;
        debug!(%algorithm, bytes_per_hash, m, set = bits.count_ones(), "decoded bloom filter");
        Ok(Filter::from_parts(bits, kernels))
    }
}

fn truncated(err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        Error::invalid_data("insufficient data")
    } else {
        Error::Io(err)
    }
}
