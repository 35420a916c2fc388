use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Sampling alphabet. `O` stays in here; it is rewritten to `0` after sampling.
pub const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of code characters in a SKU, excluding separators.
pub const SKU_LEN: usize = 12;

/// Characters per dash-separated group.
pub const GROUP_LEN: usize = 4;

/// Length of a grouped SKU such as `ABCD-EFGH-IJKL`.
pub const FORMATTED_LEN: usize = SKU_LEN + SKU_LEN / GROUP_LEN - 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkuError {
    #[error("title is empty")]
    EmptyTitle,
    #[error("title is not valid UTF-8 text")]
    NotText,
    #[error("malformed SKU {0:?}")]
    Malformed(String),
}

/// A derived stock-keeping unit code, rendered as `XXXX-XXXX-XXXX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sku(String);

impl Sku {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code without separators.
    pub fn compact(&self) -> String {
        self.0.chars().filter(|c| *c != '-').collect()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Sku {
    type Err = SkuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim();
        if is_well_formed(candidate) {
            Ok(Sku(candidate.to_string()))
        } else {
            Err(SkuError::Malformed(candidate.to_string()))
        }
    }
}

/// Derive the SKU for a product title.
///
/// The title is trimmed, hashed with SHA-256, and the first digest bytes are
/// sampled into [`ALPHABET`]. Identical trimmed titles always give the same
/// SKU; distinct titles may collide.
pub fn derive_sku(title: &str) -> Result<Sku, SkuError> {
    let normalized = title.trim();
    if normalized.is_empty() {
        return Err(SkuError::EmptyTitle);
    }

    let digest = Sha256::digest(normalized.as_bytes());
    let sampled = sample_alphabet(&digest);
    let code = sampled.replace('O', "0");
    Ok(Sku(group(&code)))
}

/// Derive a SKU from raw field bytes. Anything that is not UTF-8 is rejected.
pub fn derive_sku_from_bytes(bytes: &[u8]) -> Result<Sku, SkuError> {
    let title = std::str::from_utf8(bytes).map_err(|_| SkuError::NotText)?;
    derive_sku(title)
}

/// A SKU field is missing when it holds nothing but whitespace.
pub fn is_blank_sku(value: &str) -> bool {
    value.trim().is_empty()
}

fn sample_alphabet(digest: &[u8]) -> String {
    let mut out = String::with_capacity(SKU_LEN);
    for byte in digest {
        if out.len() >= SKU_LEN {
            break;
        }
        let high = usize::from(*byte) / ALPHABET.len() % ALPHABET.len();
        out.push(char::from(ALPHABET[high]));
        if out.len() < SKU_LEN {
            let low = usize::from(*byte) % ALPHABET.len();
            out.push(char::from(ALPHABET[low]));
        }
    }
    out
}

// Anything other than exactly SKU_LEN characters is returned as-is.
fn group(code: &str) -> String {
    if code.len() != SKU_LEN {
        return code.to_string();
    }
    let mut grouped = String::with_capacity(FORMATTED_LEN);
    for (i, c) in code.chars().enumerate() {
        if i > 0 && i % GROUP_LEN == 0 {
            grouped.push('-');
        }
        grouped.push(c);
    }
    grouped
}

fn is_well_formed(candidate: &str) -> bool {
    if candidate.len() != FORMATTED_LEN {
        return false;
    }
    candidate.split('-').count() == SKU_LEN / GROUP_LEN
        && candidate.split('-').all(|part| {
            part.len() == GROUP_LEN
                && part
                    .bytes()
                    .all(|b| b != b'O' && (b.is_ascii_uppercase() || b.is_ascii_digit()))
        })
}
