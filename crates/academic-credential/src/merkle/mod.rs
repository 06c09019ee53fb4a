//! Merkle engine — binary SHA-256 hash tree over ordered records.
//!
//! The merkle module provides:
//! - Tree construction over any sequence of `Canonical` records
//! - Inclusion proofs (sibling hash + side, leaf to root)
//! - Stateless proof verification against a claimed root
//!
//! # Padding convention
//!
//! When a level has an odd number of nodes the last node is paired with
//! itself. This is a local convention, not an external standard; tree
//! construction, proof generation and proof verification all apply it.

pub mod proof;
pub mod tree;

pub use proof::{verify_proof, MerkleProof, Position, ProofStep};
pub use tree::{hash_pair, leaf_hash, MerkleTree};
