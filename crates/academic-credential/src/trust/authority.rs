//! Accrediting authority, the root trust anchor.

use rsa::RsaPublicKey;

use crate::crypto::keys::{public_key_to_pem, KeyPair};
use crate::crypto::signing;
use crate::error::Result;

use super::certificate::{Certificate, CertificateData};

/// An accrediting authority holding a key pair and a human-readable name.
#[derive(Debug)]
pub struct Authority {
    name: String,
    key_pair: KeyPair,
}

impl Authority {
    /// Create an authority with a freshly generated default key pair.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self::with_keypair(name, KeyPair::generate()?))
    }

    /// Create an authority around an existing key pair.
    pub fn with_keypair(name: impl Into<String>, key_pair: KeyPair) -> Self {
        Self {
            name: name.into(),
            key_pair,
        }
    }

    /// The authority's name, used as `authority_identifier` on certificates.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The authority's public key, to be placed in verifiers' trust tables.
    pub fn public_key(&self) -> &RsaPublicKey {
        self.key_pair.public_key()
    }

    /// Sign a certificate binding `issuer_identifier` to `issuer_public_key`.
    pub fn certify(
        &self,
        issuer_identifier: &str,
        issuer_public_key: &RsaPublicKey,
    ) -> Result<Certificate> {
        let data = CertificateData {
            issuer_identifier: issuer_identifier.to_string(),
            issuer_public_key: public_key_to_pem(issuer_public_key)?,
        };
        let signature = signing::sign(self.key_pair.private_key(), &data)?;

        log::info!("authority '{}' certified issuer '{}'", self.name, issuer_identifier);

        Ok(Certificate {
            data,
            signature,
            authority_identifier: self.name.clone(),
        })
    }
}
