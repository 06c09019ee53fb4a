//! Merkle tree construction and proof generation.

use crate::crypto::canonical::{hash, hash_bytes, Canonical, HexDigest};
use crate::error::Result;

use super::proof::{MerkleProof, Position, ProofStep};

/// Hash of a single record: SHA-256 over its canonical encoding.
pub fn leaf_hash<T: Canonical + ?Sized>(record: &T) -> Result<HexDigest> {
    hash(record)
}

/// Internal node hash: SHA-256 over the concatenated hex strings.
pub fn hash_pair(left: &HexDigest, right: &HexDigest) -> HexDigest {
    let mut joined = String::with_capacity(left.0.len() + right.0.len());
    joined.push_str(&left.0);
    joined.push_str(&right.0);
    hash_bytes(joined.as_bytes())
}

/// A fully materialized Merkle tree.
///
/// `levels[0]` holds the leaf hashes in record order; the last level holds
/// the root. Levels are stored unpadded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<HexDigest>>,
}

impl MerkleTree {
    /// Build a tree over `records`, one leaf per record.
    pub fn build<T: Canonical>(records: &[T]) -> Result<Self> {
        let leaves = records.iter().map(leaf_hash).collect::<Result<Vec<_>>>()?;
        Ok(Self::from_leaves(leaves))
    }

    /// Build a tree from precomputed leaf hashes.
    pub fn from_leaves(leaves: Vec<HexDigest>) -> Self {
        let mut levels = vec![leaves];
        loop {
            let next = match levels.last() {
                Some(level) if level.len() > 1 => next_level(level),
                _ => break,
            };
            levels.push(next);
        }
        Self { levels }
    }

    /// The root hash, or `None` for a tree built over no records.
    pub fn root(&self) -> Option<&HexDigest> {
        if self.leaves().is_empty() {
            return None;
        }
        self.levels.last().and_then(|level| level.first())
    }

    /// Leaf hashes in record order.
    pub fn leaves(&self) -> &[HexDigest] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Number of hashing levels above the leaves (length of every proof).
    pub fn depth(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Inclusion proof for `record`, located by linear scan of leaf hashes.
    ///
    /// Returns `None` if no leaf matches. A record that cannot be
    /// canonicalized cannot be a leaf, so it is reported as absent.
    pub fn proof_for<T: Canonical + ?Sized>(&self, record: &T) -> Option<MerkleProof> {
        let leaf = leaf_hash(record).ok()?;
        let index = self.leaves().iter().position(|l| *l == leaf)?;
        self.proof_at(index)
    }

    /// Inclusion proof for the leaf at `index`.
    pub fn proof_at(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut steps = Vec::with_capacity(self.depth());
        let mut index = index;
        for level in &self.levels[..self.depth()] {
            let step = if index % 2 == 1 {
                ProofStep {
                    sibling_hash: level[index - 1].clone(),
                    position: Position::Left,
                }
            } else {
                // Odd tail: the node is its own sibling.
                ProofStep {
                    sibling_hash: level.get(index + 1).unwrap_or(&level[index]).clone(),
                    position: Position::Right,
                }
            };
            steps.push(step);
            index /= 2;
        }

        Some(MerkleProof::new(steps))
    }
}

fn next_level(level: &[HexDigest]) -> Vec<HexDigest> {
    level
        .chunks(2)
        .map(|pair| hash_pair(&pair[0], pair.get(1).unwrap_or(&pair[0])))
        .collect()
}
