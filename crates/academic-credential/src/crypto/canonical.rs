//! Canonical serialization and hashing.
//!
//! Structured records are lowered to a `serde_json::Value` and then written
//! with object keys sorted and no whitespace. Two values that are
//! semantically equal therefore produce identical bytes regardless of field
//! declaration or insertion order. Byte inputs (`[u8]`, `[u8; N]`,
//! `Vec<u8>`) pass through unchanged.
//!
//! Which of the two applies is decided by the [`Canonical`] impl of the
//! input type, so `hash(b"abc")` and `hash_bytes(b"abc")` always agree.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Lowercase hex encoding of a SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexDigest(pub String);

impl HexDigest {
    /// Return the digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HexDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value with a canonical byte encoding, the input to hashing and signing.
///
/// Structured records implement it with [`canonical_json`]:
///
/// ```
/// use academic_credential::crypto::canonical::{canonical_json, Canonical};
/// use academic_credential::Result;
///
/// #[derive(serde::Serialize)]
/// struct Transcript {
///     student: String,
///     year: u16,
/// }
///
/// impl Canonical for Transcript {
///     fn canonical_bytes(&self) -> Result<Vec<u8>> {
///         canonical_json(self)
///     }
/// }
/// ```
pub trait Canonical {
    fn canonical_bytes(&self) -> Result<Vec<u8>>;
}

impl Canonical for [u8] {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl<const N: usize> Canonical for [u8; N] {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl Canonical for Vec<u8> {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl Canonical for Value {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        write_canonical(self, &mut out)?;
        Ok(out)
    }
}

/// Produce the canonical byte encoding of a value.
pub fn canonicalize<T: Canonical + ?Sized>(value: &T) -> Result<Vec<u8>> {
    value.canonical_bytes()
}

/// Sorted-key, whitespace-free JSON encoding of a structured record.
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_value(value)?.canonical_bytes()
}

/// SHA-256 over the canonical encoding of `value`.
pub fn hash<T: Canonical + ?Sized>(value: &T) -> Result<HexDigest> {
    Ok(hash_bytes(&canonicalize(value)?))
}

/// SHA-256 over raw bytes, without canonicalization.
pub fn hash_bytes(bytes: &[u8]) -> HexDigest {
    HexDigest(hex::encode(Sha256::digest(bytes)))
}

// Key order is enforced here rather than relying on `serde_json::Map`, whose
// iteration order changes when the `preserve_order` feature is unified in.
fn write_canonical(value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                write_canonical(item, out)?;
            }
            out.push(b'}');
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_canonical(item, out)?;
            }
            out.push(b']');
        }
        scalar => serde_json::to_writer(&mut *out, scalar)?,
    }
    Ok(())
}
