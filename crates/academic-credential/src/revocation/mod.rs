//! Revocation — an append-only, file-backed set of revoked credential ids.
//!
//! The registry is the only shared mutable resource in the protocol.
//! Writers are serialized and rewrite the whole backing file before
//! returning; readers query an in-memory snapshot.

pub mod registry;

pub use registry::{LoadPolicy, RevocationRegistry};
