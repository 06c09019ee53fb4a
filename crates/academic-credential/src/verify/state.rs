//! The verification state machine.
//!
//! ```text
//! Start -> TrustChecked -> SignatureChecked -> InclusionChecked -> Accepted
//!   \____________\_______________\__________________\--> Err(kind)
//! ```
//!
//! A run is advanced by value, so a rejected run cannot be resumed.

use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};

use crate::credential::CredentialId;
use crate::crypto::signing;
use crate::error::{CredentialError, Result};
use crate::merkle;
use crate::revocation::RevocationRegistry;
use crate::wallet::VerifiablePresentation;

use super::verifier::TrustTable;

/// Position of a run in the verification pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStage {
    Start,
    TrustChecked,
    SignatureChecked,
    InclusionChecked,
    Accepted,
}

/// Report returned for an accepted presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationVerification {
    pub credential_id: CredentialId,
    pub issuer_identifier: String,
    pub authority_identifier: String,
    pub course_id: i64,
    /// Stages passed, in order, ending with `Accepted`.
    pub stages: Vec<VerificationStage>,
    /// Verification timestamp (microseconds since epoch).
    pub verified_at: u64,
}

/// One verification of one presentation.
pub struct VerificationRun<'a> {
    presentation: &'a VerifiablePresentation,
    trusted_authorities: &'a TrustTable,
    registry: &'a RevocationRegistry,
    stage: VerificationStage,
    passed: Vec<VerificationStage>,
}

impl<'a> VerificationRun<'a> {
    pub fn new(
        presentation: &'a VerifiablePresentation,
        trusted_authorities: &'a TrustTable,
        registry: &'a RevocationRegistry,
    ) -> Self {
        Self {
            presentation,
            trusted_authorities,
            registry,
            stage: VerificationStage::Start,
            passed: Vec::with_capacity(4),
        }
    }

    /// Current stage.
    pub fn stage(&self) -> VerificationStage {
        self.stage
    }

    /// Run the next check. An accepted run stays accepted.
    pub fn advance(mut self) -> Result<Self> {
        let next = match self.stage {
            VerificationStage::Start => {
                self.check_trust()?;
                VerificationStage::TrustChecked
            }
            VerificationStage::TrustChecked => {
                self.check_signature()?;
                VerificationStage::SignatureChecked
            }
            VerificationStage::SignatureChecked => {
                self.check_inclusion()?;
                VerificationStage::InclusionChecked
            }
            VerificationStage::InclusionChecked => {
                self.check_revocation()?;
                VerificationStage::Accepted
            }
            VerificationStage::Accepted => return Ok(self),
        };

        log::debug!(
            "credential {}: {:?} -> {:?}",
            self.presentation.public_part.credential_id,
            self.stage,
            next
        );
        self.stage = next;
        self.passed.push(next);
        Ok(self)
    }

    /// Drive the run to `Accepted` or the first failure.
    pub fn run(mut self) -> Result<PresentationVerification> {
        while self.stage != VerificationStage::Accepted {
            self = self.advance()?;
        }

        let vp = self.presentation;
        Ok(PresentationVerification {
            credential_id: vp.public_part.credential_id.clone(),
            issuer_identifier: vp.public_part.issuer_identifier.clone(),
            authority_identifier: vp.issuer_certificate.authority_identifier.clone(),
            course_id: vp.presented_course.id,
            stages: self.passed,
            verified_at: crate::time::now_micros(),
        })
    }

    fn check_trust(&self) -> Result<()> {
        let cert = &self.presentation.issuer_certificate;
        let authority_key = self
            .trusted_authorities
            .get(&cert.authority_identifier)
            .ok_or_else(|| CredentialError::UntrustedAuthority(cert.authority_identifier.clone()))?;
        cert.verify_signature(authority_key)
    }

    fn check_signature(&self) -> Result<()> {
        let vp = self.presentation;
        // The signed issuer must be the certified one.
        if vp.public_part.issuer_identifier != vp.issuer_certificate.data.issuer_identifier {
            return Err(CredentialError::SignatureVerification);
        }
        let issuer_key: RsaPublicKey = vp
            .issuer_certificate
            .issuer_public_key()
            .map_err(|_| CredentialError::SignatureVerification)?;
        signing::verify(&issuer_key, &vp.credential_signature, &vp.public_part)
    }

    fn check_inclusion(&self) -> Result<()> {
        let vp = self.presentation;
        if merkle::verify_proof(&vp.presented_course, &vp.merkle_proof, &vp.public_part.merkle_root) {
            Ok(())
        } else {
            Err(CredentialError::MerkleProof)
        }
    }

    fn check_revocation(&self) -> Result<()> {
        let id = &self.presentation.public_part.credential_id;
        if self.registry.is_revoked(id) {
            return Err(CredentialError::CredentialRevoked(id.to_string()));
        }
        Ok(())
    }
}
