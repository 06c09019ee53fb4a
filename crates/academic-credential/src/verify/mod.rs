//! Presentation verification — the relying party's four ordered checks.
//!
//! Verification checks, strictly in this order and fail-fast:
//! 1. Trust (certificate signed by a trusted authority)
//! 2. Credential signature (issuer signed the public part)
//! 3. Inclusion (presented course folds to the signed Merkle root)
//! 4. Revocation (credential id absent from the registry)
//!
//! A presentation is either accepted with a report or rejected with
//! exactly one error kind; there is no boolean outcome.

pub mod state;
pub mod verifier;

pub use state::{PresentationVerification, VerificationRun, VerificationStage};
pub use verifier::{verify_presentation, TrustTable, Verifier};
