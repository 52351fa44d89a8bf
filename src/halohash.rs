//! Bit-Average Halo Hash
//!
//! A locality-sensitive hash over a set of byte-string features. Every feature is
//! hashed with a wide digest; each output bit is a vote across all features for
//! that bit position. Sets sharing most of their features agree on most votes, so
//! the Hamming distance between two digests tracks how different the sets are.
//!
//! The digest is a sum over features and is therefore independent of feed order.

use crate::error::HashError;
use md5::{Digest, Md5};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

/// Per-feature digest selected by output width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WideHash {
    /// MD5 truncated to `bytes` (4, 8 or 16)
    Md5 { bytes: usize },
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl WideHash {
    fn for_size(size_in_bits: usize) -> Result<Self, HashError> {
        match size_in_bits {
            32 | 64 | 128 => Ok(WideHash::Md5 {
                bytes: size_in_bits / 8,
            }),
            160 => Ok(WideHash::Sha1),
            256 => Ok(WideHash::Sha256),
            384 => Ok(WideHash::Sha384),
            512 => Ok(WideHash::Sha512),
            other => Err(HashError::UnsupportedSize(other)),
        }
    }

    fn digest(self, feature: &[u8]) -> Vec<u8> {
        match self {
            WideHash::Md5 { bytes } => Md5::digest(feature).as_slice()[..bytes].to_vec(),
            WideHash::Sha1 => Sha1::digest(feature).to_vec(),
            WideHash::Sha256 => Sha256::digest(feature).to_vec(),
            WideHash::Sha384 => Sha384::digest(feature).to_vec(),
            WideHash::Sha512 => Sha512::digest(feature).to_vec(),
        }
    }
}

/// Accumulating bit-average halo hash.
///
/// Column `b` holds `(#features with bit b set) - (#features with bit b clear)`.
/// The output bit is set when the column is strictly negative; a tied column
/// yields 0, and an empty hash is all zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitAverageHaloHash {
    size_in_bits: usize,
    hasher: WideHash,
    columns: Vec<i64>,
    elements: u64,
}

impl BitAverageHaloHash {
    /// Create an empty hash producing `size_in_bits` bits.
    ///
    /// Supported widths: 32, 64 and 128 (MD5), 160 (SHA-1), 256, 384 and 512 (SHA-2).
    pub fn new(size_in_bits: usize) -> Result<Self, HashError> {
        let hasher = WideHash::for_size(size_in_bits)?;
        Ok(Self {
            size_in_bits,
            hasher,
            columns: vec![0; size_in_bits],
            elements: 0,
        })
    }

    /// Empty 128-bit hash, the width used for directory fingerprints.
    pub fn bah128() -> Self {
        Self {
            size_in_bits: 128,
            hasher: WideHash::Md5 { bytes: 16 },
            columns: vec![0; 128],
            elements: 0,
        }
    }

    /// Build a hash from a sequence of features.
    pub fn from_features<I, T>(features: I, size_in_bits: usize) -> Result<Self, HashError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut hash = Self::new(size_in_bits)?;
        hash.extend(features);
        Ok(hash)
    }

    /// Feed one feature.
    pub fn update(&mut self, feature: &[u8]) {
        let digest = self.hasher.digest(feature);
        for (i, column) in self.columns.iter_mut().enumerate() {
            let bit = (digest[i / 8] >> (7 - (i % 8))) & 1;
            if bit == 1 {
                *column += 1;
            } else {
                *column -= 1;
            }
        }
        self.elements += 1;
    }

    /// Feed every feature of `features`.
    pub fn extend<I, T>(&mut self, features: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        for feature in features {
            self.update(feature.as_ref());
        }
    }

    /// Fold another hash's votes into this one.
    pub fn combine(&mut self, other: &BitAverageHaloHash) -> Result<(), HashError> {
        self.check_size(other)?;
        for (mine, theirs) in self.columns.iter_mut().zip(&other.columns) {
            *mine += *theirs;
        }
        self.elements += other.elements;
        Ok(())
    }

    pub fn size_in_bits(&self) -> usize {
        self.size_in_bits
    }

    /// Number of features hashed so far.
    pub fn elements_count(&self) -> u64 {
        self.elements
    }

    /// Digest bytes, most significant bit first.
    pub fn digest(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.size_in_bits / 8];
        for (i, column) in self.columns.iter().enumerate() {
            if *column < 0 {
                out[i / 8] |= 0x80 >> (i % 8);
            }
        }
        out
    }

    /// Lowercase hex digest, `size_in_bits / 4` characters.
    pub fn hexdigest(&self) -> String {
        hex::encode(self.digest())
    }

    /// Hamming distance between the two digests.
    pub fn distance(&self, other: &BitAverageHaloHash) -> Result<u32, HashError> {
        self.check_size(other)?;
        Ok(hamming_distance(&self.digest(), &other.digest()))
    }

    fn check_size(&self, other: &BitAverageHaloHash) -> Result<(), HashError> {
        if self.size_in_bits != other.size_in_bits {
            return Err(HashError::SizeMismatch {
                left: self.size_in_bits,
                right: other.size_in_bits,
            });
        }
        Ok(())
    }
}

/// Hex digest of `features` at `size_in_bits`.
pub fn hash<I, T>(features: I, size_in_bits: usize) -> Result<String, HashError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    Ok(BitAverageHaloHash::from_features(features, size_in_bits)?.hexdigest())
}

/// Number of differing bits between two byte strings of equal length.
///
/// Extra trailing bytes on the longer input are ignored.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}
