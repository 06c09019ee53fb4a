//! AcademicCredential — selectively disclosable academic credentials.
//!
//! An accrediting authority certifies issuers; an issuer commits a
//! student's course list under a Merkle root and signs the public part;
//! the student's wallet discloses single courses with inclusion proofs;
//! a verifier checks trust, signature, inclusion and revocation, in that
//! order.

pub mod config;
pub mod credential;
pub mod crypto;
pub mod error;
pub mod merkle;
pub mod revocation;
pub mod time;
pub mod trust;
pub mod verify;
pub mod wallet;

// Re-export primary types
pub use config::ProtocolConfig;
pub use credential::{
    issue, CourseRecord, Credential, CredentialId, Issuer, VerifiableCredentialPublicPart,
};
pub use crypto::{HexDigest, KeyPair, Signature};
pub use error::{CredentialError, ErrorKind, Result};
pub use merkle::{MerkleProof, MerkleTree, Position, ProofStep};
pub use revocation::{LoadPolicy, RevocationRegistry};
pub use trust::{Authority, Certificate, CertificateData};
pub use verify::{
    verify_presentation, PresentationVerification, TrustTable, VerificationRun, VerificationStage,
    Verifier,
};
pub use wallet::{present, VerifiablePresentation, Wallet};
