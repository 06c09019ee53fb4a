//! Stress test: many threads verifying presentations in parallel.
//!
//! A verifier, its registry and the presentations are shared read-only;
//! every thread must reach the same decision.

use std::sync::Arc;
use std::thread;

use academic_credential::{
    Authority, CourseRecord, ErrorKind, Issuer, KeyPair, RevocationRegistry, Verifier, Wallet,
};

fn test_keypair() -> KeyPair {
    KeyPair::generate_with(1024, 65537).expect("key generation should succeed")
}

#[test]
fn parallel_verification_agrees() {
    let authority = Authority::with_keypair("EA", test_keypair());
    let issuer = Issuer::new("uni", test_keypair(), &authority).unwrap();
    let mut wallet = Wallet::with_keypair("student", test_keypair()).unwrap();

    let courses: Vec<CourseRecord> = (1..=12)
        .map(|i| CourseRecord::new(i, format!("Course {i}"), 18.0 + i as f64, 6, "2024-06-30"))
        .collect();
    let credential = issuer.issue_credential(wallet.pseudonym(), courses).unwrap();
    let credential_id = credential.credential_id.clone();
    wallet.receive(credential).unwrap();

    let mut verifier = Verifier::new("verifier");
    verifier.trust_authority(&authority);

    let dir = tempfile::tempdir().unwrap();
    let registry = RevocationRegistry::open(dir.path().join("r.json")).unwrap();

    let presentations: Vec<_> = (1..=12)
        .map(|i| wallet.create_presentation(&credential_id, i).unwrap())
        .collect();

    let verifier = Arc::new(verifier);
    let registry = Arc::new(registry);
    let presentations = Arc::new(presentations);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let verifier = Arc::clone(&verifier);
            let registry = Arc::clone(&registry);
            let presentations = Arc::clone(&presentations);
            thread::spawn(move || {
                for (i, vp) in presentations.iter().enumerate() {
                    let report = verifier
                        .verify_presentation(vp, &registry)
                        .expect("presentation should be accepted");
                    assert_eq!(report.course_id, i as i64 + 1);

                    if (i + t) % 3 == 0 {
                        let mut tampered = vp.clone();
                        tampered.presented_course.credits += 1;
                        let err = verifier.verify_presentation(&tampered, &registry).unwrap_err();
                        assert_eq!(err.kind(), ErrorKind::MerkleProof);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().expect("thread should not panic");
    }
}

#[test]
fn revocation_is_seen_by_all_threads() {
    let authority = Authority::with_keypair("EA", test_keypair());
    let issuer = Issuer::new("uni", test_keypair(), &authority).unwrap();
    let credential = issuer
        .issue_credential(
            "pseudo",
            vec![CourseRecord::new(7, "Compilers", 29.0, 9, "2024-01-15")],
        )
        .unwrap();
    let vp = academic_credential::present(&credential, 7).unwrap();

    let mut verifier = Verifier::new("verifier");
    verifier.trust_authority(&authority);

    let dir = tempfile::tempdir().unwrap();
    let registry = Arc::new(RevocationRegistry::open(dir.path().join("r.json")).unwrap());
    issuer
        .revoke_credential(&registry, &credential.credential_id)
        .unwrap();

    let verifier = Arc::new(verifier);
    let vp = Arc::new(vp);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let verifier = Arc::clone(&verifier);
            let registry = Arc::clone(&registry);
            let vp = Arc::clone(&vp);
            thread::spawn(move || {
                let err = verifier.verify_presentation(&vp, &registry).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::CredentialRevoked);
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
