//! Academic credentials and the issuance operation.

use std::collections::HashSet;

use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};

use crate::crypto::canonical::{canonical_json, Canonical, HexDigest};
use crate::crypto::signing::{self, Signature};
use crate::error::{CredentialError, Result};
use crate::merkle::{self, MerkleProof, MerkleTree};
use crate::trust::Certificate;

use super::record::CourseRecord;

/// Unique identifier for a credential: a hyphenated UUID v4 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CredentialId(pub String);

impl CredentialId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CredentialId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The exact tuple covered by the issuer's signature.
///
/// Any verifier can rebuild it from a credential's public fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiableCredentialPublicPart {
    pub credential_id: CredentialId,
    pub issuer_identifier: String,
    pub student_pseudonym: String,
    pub merkle_root: HexDigest,
    pub issue_date: String,
}

impl Canonical for VerifiableCredentialPublicPart {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        canonical_json(self)
    }
}

/// A signed academic credential.
///
/// Only [`issue`] produces one with a valid signature; there is no
/// mutation API afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub credential_id: CredentialId,
    pub issuer_identifier: String,
    pub student_pseudonym: String,
    /// Committed course list, in leaf order.
    pub courses: Vec<CourseRecord>,
    pub issue_date: String,
    pub merkle_root: HexDigest,
    /// Issuer certificate, as granted by its accrediting authority.
    pub certificate: Certificate,
    /// Issuer signature over [`Credential::public_part`].
    pub signature: Signature,
}

impl Credential {
    /// Rebuild the signed public part.
    pub fn public_part(&self) -> VerifiableCredentialPublicPart {
        VerifiableCredentialPublicPart {
            credential_id: self.credential_id.clone(),
            issuer_identifier: self.issuer_identifier.clone(),
            student_pseudonym: self.student_pseudonym.clone(),
            merkle_root: self.merkle_root.clone(),
            issue_date: self.issue_date.clone(),
        }
    }

    /// Rebuild the Merkle tree over the committed course list.
    pub fn merkle_tree(&self) -> Result<MerkleTree> {
        MerkleTree::build(&self.courses)
    }

    /// Look up a course by id.
    pub fn course(&self, course_id: i64) -> Option<&CourseRecord> {
        self.courses.iter().find(|c| c.id == course_id)
    }

    /// Inclusion proof for `course` under `merkle_root`.
    ///
    /// Returns `None` if the course is not a leaf, or if the course list no
    /// longer hashes to the committed root.
    pub fn proof_for_course(&self, course: &CourseRecord) -> Result<Option<MerkleProof>> {
        let tree = self.merkle_tree()?;
        if tree.root() != Some(&self.merkle_root) {
            return Ok(None);
        }
        Ok(tree.proof_for(course))
    }

    /// Check a course against a Merkle root.
    pub fn verify_course_proof(course: &CourseRecord, proof: &MerkleProof, merkle_root: &HexDigest) -> bool {
        merkle::verify_proof(course, proof, merkle_root)
    }

    /// Verify the issuer signature using the key in the embedded certificate.
    ///
    /// This does not establish trust in the certificate itself.
    pub fn verify_signature(&self) -> Result<()> {
        let issuer_key = self
            .certificate
            .issuer_public_key()
            .map_err(|_| CredentialError::SignatureVerification)?;
        signing::verify(&issuer_key, &self.signature, &self.public_part())
    }

    /// Serialize to the JSON wire representation.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse the JSON wire representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Assemble and sign a credential over `courses`.
///
/// Rejects an empty course list, duplicate course ids, non-finite grades
/// and an `issuer_identifier` that disagrees with the certificate.
pub fn issue(
    issuer_key: &RsaPrivateKey,
    certificate: &Certificate,
    issuer_identifier: &str,
    student_pseudonym: &str,
    courses: Vec<CourseRecord>,
) -> Result<Credential> {
    validate_courses(&courses)?;
    if certificate.issuer_identifier() != issuer_identifier {
        return Err(CredentialError::InvalidCredential(format!(
            "issuer '{issuer_identifier}' does not match certificate subject '{}'",
            certificate.issuer_identifier()
        )));
    }

    let tree = MerkleTree::build(&courses)?;
    let merkle_root = tree
        .root()
        .cloned()
        .ok_or_else(|| CredentialError::InvalidCredential("empty course list".into()))?;

    let public_part = VerifiableCredentialPublicPart {
        credential_id: CredentialId::generate(),
        issuer_identifier: issuer_identifier.to_string(),
        student_pseudonym: student_pseudonym.to_string(),
        merkle_root,
        issue_date: crate::time::now_rfc3339(),
    };
    let signature = signing::sign(issuer_key, &public_part)?;

    log::info!(
        "issuer '{}' issued credential {} over {} courses (root {})",
        issuer_identifier,
        public_part.credential_id,
        courses.len(),
        &public_part.merkle_root.0[..10],
    );

    let VerifiableCredentialPublicPart {
        credential_id,
        issuer_identifier,
        student_pseudonym,
        merkle_root,
        issue_date,
    } = public_part;

    Ok(Credential {
        credential_id,
        issuer_identifier,
        student_pseudonym,
        courses,
        issue_date,
        merkle_root,
        certificate: certificate.clone(),
        signature,
    })
}

fn validate_courses(courses: &[CourseRecord]) -> Result<()> {
    if courses.is_empty() {
        return Err(CredentialError::InvalidCredential(
            "cannot issue a credential over an empty course list".into(),
        ));
    }

    let mut seen = HashSet::with_capacity(courses.len());
    for course in courses {
        if !seen.insert(course.id) {
            return Err(CredentialError::InvalidCredential(format!(
                "duplicate course id {}",
                course.id
            )));
        }
        if !course.grade.is_finite() {
            return Err(CredentialError::InvalidCredential(format!(
                "course {} has a non-finite grade",
                course.id
            )));
        }
    }
    Ok(())
}
