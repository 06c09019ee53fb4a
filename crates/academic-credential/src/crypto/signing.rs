//! RSA-PSS signing and verification.
//!
//! Signatures are RSA-PSS with SHA-256 and MGF1-SHA-256, salt length equal
//! to the digest length, computed over the canonical encoding of a value.
//! Verification never returns a boolean: a mismatch or a malformed
//! signature is [`CredentialError::SignatureVerification`].

use rsa::pss::{BlindedSigningKey, Signature as PssSignature, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;

use super::canonical::{canonicalize, Canonical};
use crate::error::{CredentialError, Result};

/// Raw signature bytes. Serialized as standard base64.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Return the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode as standard base64.
    pub fn to_base64(&self) -> String {
        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &self.0)
    }

    /// Decode from standard base64.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        base64::Engine::decode(&base64::engine::general_purpose::STANDARD, encoded)
            .map(Self)
            .map_err(|e| CredentialError::Serialization(format!("invalid base64 signature: {e}")))
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({} bytes)", self.0.len())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_base64(&encoded).map_err(serde::de::Error::custom)
    }
}

/// Sign the canonical encoding of `value`.
pub fn sign<T: Canonical + ?Sized>(private_key: &RsaPrivateKey, value: &T) -> Result<Signature> {
    sign_bytes(private_key, &canonicalize(value)?)
}

/// Sign raw message bytes.
pub fn sign_bytes(private_key: &RsaPrivateKey, message: &[u8]) -> Result<Signature> {
    let signing_key = BlindedSigningKey::<Sha256>::new(private_key.clone());
    let signature = signing_key
        .try_sign_with_rng(&mut rand::thread_rng(), message)
        .map_err(|e| CredentialError::InvalidKey(format!("RSA-PSS signing failed: {e}")))?;
    Ok(Signature(signature.to_vec()))
}

/// Verify a signature over the canonical encoding of `value`.
pub fn verify<T: Canonical + ?Sized>(
    public_key: &RsaPublicKey,
    signature: &Signature,
    value: &T,
) -> Result<()> {
    let message = canonicalize(value).map_err(|_| CredentialError::SignatureVerification)?;
    verify_bytes(public_key, signature, &message)
}

/// Verify a signature over raw message bytes.
pub fn verify_bytes(public_key: &RsaPublicKey, signature: &Signature, message: &[u8]) -> Result<()> {
    let signature = PssSignature::try_from(signature.as_bytes())
        .map_err(|_| CredentialError::SignatureVerification)?;
    VerifyingKey::<Sha256>::new(public_key.clone())
        .verify(message, &signature)
        .map_err(|_| CredentialError::SignatureVerification)
}
