//! Merkle inclusion proofs.
//!
//! A proof is the ordered list of sibling hashes from a leaf up to the
//! root, each tagged with the side the sibling occupies. Verification folds
//! the proof over the recomputed leaf hash and compares with the root.

use serde::{Deserialize, Serialize};

use crate::crypto::canonical::{Canonical, HexDigest};

use super::tree::{hash_pair, leaf_hash};

/// Side of the path node on which the sibling sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
}

/// One level of an inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Hash of the sibling node at this level.
    pub sibling_hash: HexDigest,
    /// Which side the sibling occupies relative to the path node.
    pub position: Position,
}

/// Ordered sibling path from leaf to root.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof(Vec<ProofStep>);

impl MerkleProof {
    /// Wrap an ordered list of steps.
    pub fn new(steps: Vec<ProofStep>) -> Self {
        Self(steps)
    }

    /// The steps, leaf level first.
    pub fn steps(&self) -> &[ProofStep] {
        &self.0
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the proof of a single-leaf tree.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fold the proof over a starting leaf hash.
    pub fn fold(&self, leaf: HexDigest) -> HexDigest {
        self.0.iter().fold(leaf, |current, step| match step.position {
            Position::Left => hash_pair(&step.sibling_hash, &current),
            Position::Right => hash_pair(&current, &step.sibling_hash),
        })
    }
}

/// Check that `record` is committed under `root` via `proof`.
///
/// A digest mismatch is not secret-dependent, so plain equality is used.
pub fn verify_proof<T: Canonical + ?Sized>(record: &T, proof: &MerkleProof, root: &HexDigest) -> bool {
    match leaf_hash(record) {
        Ok(leaf) => proof.fold(leaf) == *root,
        Err(_) => false,
    }
}
