//! RSA key pair generation and PEM encoding.
//!
//! Every actor (authority, issuer, wallet) owns exactly one key pair.
//! Public keys travel as SPKI PEM strings; private keys never leave the
//! owning process and are zeroized on drop by the `rsa` crate.

use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};

use crate::error::{CredentialError, Result};

/// Default RSA modulus size in bits.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Default RSA public exponent.
pub const DEFAULT_PUBLIC_EXPONENT: u64 = 65537;

/// An RSA key pair for signing operations.
pub struct KeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl KeyPair {
    /// Generate a new 2048-bit key pair with exponent 65537.
    pub fn generate() -> Result<Self> {
        Self::generate_with(DEFAULT_KEY_BITS, DEFAULT_PUBLIC_EXPONENT)
    }

    /// Generate a new key pair with an explicit modulus size and exponent.
    pub fn generate_with(bits: usize, public_exponent: u64) -> Result<Self> {
        let exponent = BigUint::from(public_exponent);
        let private_key = RsaPrivateKey::new_with_exp(&mut rand::thread_rng(), bits, &exponent)
            .map_err(|e| CredentialError::InvalidKey(format!("RSA key generation failed: {e}")))?;
        let public_key = private_key.to_public_key();
        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Return a reference to the private key.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Return the public key.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Return the public key as an SPKI PEM string.
    pub fn public_key_pem(&self) -> Result<String> {
        public_key_to_pem(&self.public_key)
    }

    /// Modulus size in bits.
    pub fn key_bits(&self) -> usize {
        self.public_key.n().bits()
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_bits", &self.key_bits())
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Encode a public key as an SPKI PEM string.
pub fn public_key_to_pem(key: &RsaPublicKey) -> Result<String> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| CredentialError::InvalidKey(format!("PEM encoding failed: {e}")))
}

/// Decode an SPKI PEM string into a public key.
pub fn public_key_from_pem(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|e| CredentialError::InvalidKey(format!("invalid public key PEM: {e}")))
}
