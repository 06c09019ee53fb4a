//! Issuing institution: a certified key holder that signs credentials.

use rsa::RsaPublicKey;

use crate::crypto::keys::KeyPair;
use crate::error::Result;
use crate::revocation::RevocationRegistry;
use crate::trust::{Authority, Certificate};

use super::credential::{issue, Credential, CredentialId};
use super::record::CourseRecord;

/// An issuer holding its key pair and the certificate an authority gave it.
#[derive(Debug)]
pub struct Issuer {
    identifier: String,
    key_pair: KeyPair,
    certificate: Certificate,
}

impl Issuer {
    /// Create an issuer and have `authority` certify its public key.
    pub fn new(identifier: impl Into<String>, key_pair: KeyPair, authority: &Authority) -> Result<Self> {
        let identifier = identifier.into();
        let certificate = authority.certify(&identifier, key_pair.public_key())?;
        Ok(Self {
            identifier,
            key_pair,
            certificate,
        })
    }

    /// Reassemble an issuer from a previously obtained certificate.
    pub fn from_parts(identifier: impl Into<String>, key_pair: KeyPair, certificate: Certificate) -> Self {
        Self {
            identifier: identifier.into(),
            key_pair,
            certificate,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        self.key_pair.public_key()
    }

    /// Issue a signed credential for `student_pseudonym` over `courses`.
    pub fn issue_credential(&self, student_pseudonym: &str, courses: Vec<CourseRecord>) -> Result<Credential> {
        issue(
            self.key_pair.private_key(),
            &self.certificate,
            &self.identifier,
            student_pseudonym,
            courses,
        )
    }

    /// Record the revocation of one of this issuer's credentials.
    pub fn revoke_credential(&self, registry: &RevocationRegistry, credential_id: &CredentialId) -> Result<()> {
        log::info!("issuer '{}' revoking credential {}", self.identifier, credential_id);
        registry.add(credential_id)
    }
}
