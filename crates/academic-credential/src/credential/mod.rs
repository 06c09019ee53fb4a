//! Credential issuance — course records committed under a signed Merkle root.
//!
//! An issuer canonicalizes the course list, builds a Merkle tree over it
//! and signs only the public part (id, issuer, pseudonym, root, date).
//! Individual courses are later proven against the root, never signed
//! directly.

pub mod credential;
pub mod issuer;
pub mod record;

pub use credential::{issue, Credential, CredentialId, VerifiableCredentialPublicPart};
pub use issuer::Issuer;
pub use record::CourseRecord;
