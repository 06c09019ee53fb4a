//! Cryptographic primitives for academic credentials.
//!
//! This module provides:
//! - Canonical serialization and SHA-256 hex digests
//! - RSA key pair generation and PEM encoding
//! - RSA-PSS (SHA-256) signing and verification over canonical bytes

pub mod canonical;
pub mod keys;
pub mod signing;

pub use canonical::{canonical_json, canonicalize, hash, hash_bytes, Canonical, HexDigest};
pub use keys::{public_key_from_pem, public_key_to_pem, KeyPair};
pub use signing::{sign, verify, Signature};
