//! Issuer certificates: an authority's signature over an issuer's key.

use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};

use crate::crypto::canonical::{canonical_json, Canonical};
use crate::crypto::keys::public_key_from_pem;
use crate::crypto::signing::{self, Signature};
use crate::error::Result;

/// The signed content of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateData {
    /// Identifier of the certified issuer.
    pub issuer_identifier: String,
    /// Issuer's public key as an SPKI PEM string.
    pub issuer_public_key: String,
}

impl Canonical for CertificateData {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        canonical_json(self)
    }
}

/// A certificate binding an issuer to its public key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    /// The certified binding.
    pub data: CertificateData,
    /// Authority's RSA-PSS signature over the canonical `data`.
    pub signature: Signature,
    /// Name of the authority that signed `data`.
    pub authority_identifier: String,
}

impl Certificate {
    /// Verify the authority's signature on this certificate.
    pub fn verify_signature(&self, authority_key: &RsaPublicKey) -> Result<()> {
        signing::verify(authority_key, &self.signature, &self.data)
    }

    /// Decode the certified issuer public key.
    pub fn issuer_public_key(&self) -> Result<RsaPublicKey> {
        public_key_from_pem(&self.data.issuer_public_key)
    }

    /// Identifier of the certified issuer.
    pub fn issuer_identifier(&self) -> &str {
        &self.data.issuer_identifier
    }
}
