//! Verifying institution and its trusted-authority table.

use std::collections::HashMap;

use rsa::RsaPublicKey;

use crate::error::Result;
use crate::revocation::RevocationRegistry;
use crate::trust::Authority;
use crate::wallet::VerifiablePresentation;

use super::state::{PresentationVerification, VerificationRun};

/// Authority name → authority public key.
pub type TrustTable = HashMap<String, RsaPublicKey>;

/// Verify `presentation` against a trust table and a revocation registry.
///
/// Returns a report on acceptance, or exactly one of
/// `UntrustedAuthority`, `SignatureVerification`, `MerkleProof` or
/// `CredentialRevoked`.
pub fn verify_presentation(
    presentation: &VerifiablePresentation,
    trusted_authorities: &TrustTable,
    registry: &RevocationRegistry,
) -> Result<PresentationVerification> {
    let credential_id = &presentation.public_part.credential_id;
    match VerificationRun::new(presentation, trusted_authorities, registry).run() {
        Ok(report) => {
            log::info!(
                "accepted course {} of credential {credential_id}",
                report.course_id
            );
            Ok(report)
        }
        Err(e) => {
            log::warn!("rejected presentation of credential {credential_id}: {e}");
            Err(e)
        }
    }
}

/// A relying party with its own table of trusted authorities.
#[derive(Debug, Clone)]
pub struct Verifier {
    identifier: String,
    trusted_authorities: TrustTable,
}

impl Verifier {
    /// Create a verifier that trusts no one yet.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            trusted_authorities: TrustTable::new(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Trust certificates signed by `authority`.
    pub fn trust_authority(&mut self, authority: &Authority) {
        self.trust(authority.name(), authority.public_key().clone());
    }

    /// Trust certificates tagged `name` and signed by `public_key`.
    ///
    /// Replaces any key previously trusted under the same name.
    pub fn trust(&mut self, name: impl Into<String>, public_key: RsaPublicKey) {
        let name = name.into();
        log::info!("verifier '{}' now trusts '{}'", self.identifier, name);
        self.trusted_authorities.insert(name, public_key);
    }

    pub fn is_trusted(&self, name: &str) -> bool {
        self.trusted_authorities.contains_key(name)
    }

    pub fn trusted_authorities(&self) -> &TrustTable {
        &self.trusted_authorities
    }

    /// Start a step-by-step verification run.
    pub fn start<'a>(
        &'a self,
        presentation: &'a VerifiablePresentation,
        registry: &'a RevocationRegistry,
    ) -> VerificationRun<'a> {
        VerificationRun::new(presentation, &self.trusted_authorities, registry)
    }

    /// Run all four checks on `presentation`.
    pub fn verify_presentation(
        &self,
        presentation: &VerifiablePresentation,
        registry: &RevocationRegistry,
    ) -> Result<PresentationVerification> {
        verify_presentation(presentation, &self.trusted_authorities, registry)
    }
}
