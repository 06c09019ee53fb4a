//! Holder wallet — custody of credentials and selective disclosure.
//!
//! A presentation reveals one committed course plus its inclusion proof,
//! the signed public part and the issuer certificate. The other courses
//! stay in the wallet.

pub mod presentation;
pub mod wallet;

pub use presentation::{present, VerifiablePresentation, PRESENTATION_TYPE};
pub use wallet::Wallet;
