//! Edge-case tests for the Merkle engine.
//!
//! Exercises single leaves, odd levels, duplicate records, large trees and
//! malformed proofs.

use academic_credential::crypto::hash_bytes;
use academic_credential::merkle::{hash_pair, leaf_hash, verify_proof};
use academic_credential::{CourseRecord, MerkleProof, MerkleTree, Position, ProofStep};

fn course(i: i64) -> CourseRecord {
    CourseRecord::new(i, format!("Course {i}"), 18.0 + (i % 13) as f64, 6, "2024-06-30")
}

#[test]
fn single_leaf_root_is_leaf_hash() {
    let records = vec![course(1)];
    let tree = MerkleTree::build(&records).unwrap();
    assert_eq!(tree.root(), Some(&leaf_hash(&records[0]).unwrap()));

    let proof = tree.proof_for(&records[0]).unwrap();
    assert!(proof.is_empty());
    assert!(verify_proof(&records[0], &proof, tree.root().unwrap()));
}

#[test]
fn three_leaves_duplicate_last() {
    let records: Vec<_> = (1..=3).map(course).collect();
    let tree = MerkleTree::build(&records).unwrap();

    let l: Vec<_> = records.iter().map(|r| leaf_hash(r).unwrap()).collect();
    let expected = hash_pair(&hash_pair(&l[0], &l[1]), &hash_pair(&l[2], &l[2]));
    assert_eq!(tree.root(), Some(&expected));

    // The padded node's first sibling is itself.
    let proof = tree.proof_for(&records[2]).unwrap();
    assert_eq!(proof.steps()[0].sibling_hash, l[2]);
    assert_eq!(proof.steps()[0].position, Position::Right);
    assert!(verify_proof(&records[2], &proof, &expected));
}

#[test]
fn large_tree_every_proof_verifies() {
    let records: Vec<_> = (0..1000).map(course).collect();
    let tree = MerkleTree::build(&records).unwrap();
    let root = tree.root().unwrap().clone();
    assert_eq!(tree.leaf_count(), 1000);
    assert_eq!(tree.depth(), 10);

    for (i, record) in records.iter().enumerate() {
        let proof = tree.proof_at(i).unwrap();
        assert_eq!(proof.len(), 10);
        assert!(verify_proof(record, &proof, &root), "leaf {i}");
    }
}

#[test]
fn proof_does_not_transfer_between_leaves() {
    let records: Vec<_> = (0..9).map(course).collect();
    let tree = MerkleTree::build(&records).unwrap();
    let root = tree.root().unwrap();

    let proof_of_4 = tree.proof_for(&records[4]).unwrap();
    for (i, record) in records.iter().enumerate() {
        assert_eq!(verify_proof(record, &proof_of_4, root), i == 4);
    }
}

#[test]
fn duplicate_records_share_the_first_proof() {
    let records = vec![course(1), course(2), course(1)];
    let tree = MerkleTree::build(&records).unwrap();
    let root = tree.root().unwrap();

    let proof = tree.proof_for(&records[2]).unwrap();
    assert_eq!(Some(proof.clone()), tree.proof_at(0));
    assert!(verify_proof(&records[2], &proof, root));
    assert!(verify_proof(&records[2], &tree.proof_at(2).unwrap(), root));
}

#[test]
fn empty_input_has_no_root() {
    let tree = MerkleTree::build::<CourseRecord>(&[]).unwrap();
    assert!(tree.root().is_none());
    assert!(tree.proof_for(&course(1)).is_none());
    assert!(tree.proof_at(0).is_none());
}

#[test]
fn malformed_proofs_are_rejected() {
    let records: Vec<_> = (0..4).map(course).collect();
    let tree = MerkleTree::build(&records).unwrap();
    let root = tree.root().unwrap();
    let good = tree.proof_for(&records[1]).unwrap();

    // Truncated.
    let truncated = MerkleProof::new(good.steps()[..1].to_vec());
    assert!(!verify_proof(&records[1], &truncated, root));

    // Extended.
    let mut steps = good.steps().to_vec();
    steps.push(ProofStep {
        sibling_hash: hash_bytes(b"extra"),
        position: Position::Left,
    });
    assert!(!verify_proof(&records[1], &MerkleProof::new(steps), root));

    // Side flipped.
    let mut steps = good.steps().to_vec();
    steps[0].position = match steps[0].position {
        Position::Left => Position::Right,
        Position::Right => Position::Left,
    };
    assert!(!verify_proof(&records[1], &MerkleProof::new(steps), root));

    // Empty proof only matches a single-leaf root.
    assert!(!verify_proof(&records[1], &MerkleProof::default(), root));
}
