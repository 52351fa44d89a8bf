//! Directory fingerprints
//!
//! A fingerprint is the 40-character wire string `CCCCCCCCHHHH...H`: the feature
//! count as 8 lowercase hex digits followed by the 128-bit halo hash digest as 32
//! lowercase hex digits.

pub mod features;

pub use features::{content_features, size_bucket, structure_features};

use crate::error::FormatError;
use crate::halohash::{hamming_distance, BitAverageHaloHash};
use crate::tree::node::Resource;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of a fingerprint wire string.
pub const FINGERPRINT_LEN: usize = 40;

/// Length of the feature count prefix.
const COUNT_LEN: usize = 8;

/// Length of the hex digest part.
pub const DIGEST_HEX_LEN: usize = 32;

/// Feature count plus 128-bit halo hash digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    count: u32,
    digest: [u8; 16],
}

impl Fingerprint {
    pub fn new(count: u32, digest: [u8; 16]) -> Self {
        Self { count, digest }
    }

    /// Number of features that went into the digest.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn digest(&self) -> &[u8; 16] {
        &self.digest
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// The digest split into four 4-byte chunks.
    pub fn chunks(&self) -> [[u8; 4]; 4] {
        let mut chunks = [[0u8; 4]; 4];
        for (i, chunk) in chunks.iter_mut().enumerate() {
            chunk.copy_from_slice(&self.digest[i * 4..(i + 1) * 4]);
        }
        chunks
    }

    /// Hamming distance between the two digests. Counts are not compared.
    pub fn distance(&self, other: &Fingerprint) -> u32 {
        hamming_distance(&self.digest, &other.digest)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}{}", self.count, hex::encode(self.digest))
    }
}

impl FromStr for Fingerprint {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != FINGERPRINT_LEN {
            return Err(FormatError::InvalidLength {
                expected: FINGERPRINT_LEN,
                actual: s.len(),
            });
        }
        if let Some((position, ch)) = s
            .chars()
            .enumerate()
            .find(|&(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(FormatError::InvalidCharacter { ch, position });
        }
        let count: [u8; 4] = decode_hex(&s[..COUNT_LEN])?;
        let digest: [u8; 16] = decode_hex(&s[COUNT_LEN..])?;
        Ok(Self {
            count: u32::from_be_bytes(count),
            digest,
        })
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

fn decode_hex<const N: usize>(text: &str) -> Result<[u8; N], FormatError> {
    let mut out = [0u8; N];
    hex::decode_to_slice(text, &mut out)
        .map_err(|_| FormatError::InvalidDigest(text.to_string()))?;
    Ok(out)
}

/// Fingerprint a feature list.
///
/// Empty features are dropped before counting and hashing.
pub fn make_fingerprint<I, S>(features: I) -> Result<Fingerprint, FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut bah = BitAverageHaloHash::bah128();
    for feature in features {
        let feature = feature.as_ref();
        if !feature.is_empty() {
            bah.update(feature.as_bytes());
        }
    }
    let indexed = bah.elements_count() as usize;
    let count = u32::try_from(indexed).map_err(|_| FormatError::CountOverflow(indexed))?;

    let mut digest = [0u8; 16];
    digest.copy_from_slice(&bah.digest());
    Ok(Fingerprint { count, digest })
}

/// Split a wire fingerprint into its feature count and hex digest.
pub fn split_fingerprint(fingerprint: &str) -> Result<(u32, String), FormatError> {
    let parsed: Fingerprint = fingerprint.parse()?;
    Ok((parsed.count, parsed.digest_hex()))
}

/// Split a 32-hex-character digest into four 4-byte chunks.
///
/// Used by bucketed similarity indexes that match on any equal chunk.
pub fn digest_to_chunks(digest: &str) -> Result<[[u8; 4]; 4], FormatError> {
    if digest.len() != DIGEST_HEX_LEN {
        return Err(FormatError::InvalidDigest(digest.to_string()));
    }
    let bytes: [u8; 16] = decode_hex(digest)?;
    Ok(Fingerprint::new(0, bytes).chunks())
}

/// Content fingerprint over the checksums of `file_descendants`.
pub fn create_content_fingerprint<'a, I>(file_descendants: I) -> Result<Fingerprint, FormatError>
where
    I: IntoIterator<Item = &'a Resource>,
{
    make_fingerprint(content_features(file_descendants))
}

/// Structure fingerprint over the relative paths and size buckets of `children`.
pub fn create_structure_fingerprint<'a, I>(
    directory: &Resource,
    children: I,
) -> Result<Fingerprint, FormatError>
where
    I: IntoIterator<Item = &'a Resource>,
{
    make_fingerprint(structure_features(directory, children))
}
