//! Verifiable presentations: single-course selective disclosures.

use serde::{Deserialize, Serialize};

use crate::credential::{CourseRecord, Credential, VerifiableCredentialPublicPart};
use crate::crypto::signing::Signature;
use crate::error::{CredentialError, Result};
use crate::merkle::MerkleProof;
use crate::trust::Certificate;

/// Value of the `type` tag carried by every presentation.
pub const PRESENTATION_TYPE: &str = "VerifiablePresentation";

/// A disclosure of one course from a credential.
///
/// Created per disclosure and never persisted by the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiablePresentation {
    #[serde(rename = "type")]
    pub presentation_type: String,
    pub presented_course: CourseRecord,
    pub merkle_proof: MerkleProof,
    pub public_part: VerifiableCredentialPublicPart,
    pub issuer_certificate: Certificate,
    pub credential_signature: Signature,
}

impl VerifiablePresentation {
    /// Serialize to the JSON wire representation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the JSON wire representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build a presentation disclosing the course `course_id` of `credential`.
///
/// # Errors
///
/// Returns `CredentialError::CourseNotFound` if the credential has no such
/// course, or if the course cannot be proven against the credential's tree.
pub fn present(credential: &Credential, course_id: i64) -> Result<VerifiablePresentation> {
    let course = credential
        .course(course_id)
        .ok_or_else(|| CredentialError::CourseNotFound(course_id.to_string()))?;

    let merkle_proof = credential.proof_for_course(course)?.ok_or_else(|| {
        CredentialError::CourseNotFound(format!("{course_id} (no inclusion proof)"))
    })?;

    log::debug!(
        "presenting course {} of credential {}",
        course_id,
        credential.credential_id
    );

    Ok(VerifiablePresentation {
        presentation_type: PRESENTATION_TYPE.to_string(),
        presented_course: course.clone(),
        merkle_proof,
        public_part: credential.public_part(),
        issuer_certificate: credential.certificate.clone(),
        credential_signature: credential.signature.clone(),
    })
}
