//! Integration test: end-to-end credential workflow.
//!
//! Covers the complete lifecycle:
//! 1. Authority certifies an issuer
//! 2. Issuer issues a credential to a wallet
//! 3. Wallet discloses a single course
//! 4. Verifier accepts, then rejects tampered, forged, revoked and
//!    untrusted presentations with the matching error kind

use academic_credential::crypto::keys::KeyPair;
use academic_credential::crypto::signing;
use academic_credential::merkle::MerkleTree;
use academic_credential::{
    Authority, CourseRecord, Credential, CredentialId, ErrorKind, Issuer, RevocationRegistry,
    VerifiableCredentialPublicPart, VerificationStage, Verifier, Wallet,
};

fn test_keypair() -> KeyPair {
    KeyPair::generate_with(1024, 65537).expect("key generation should succeed")
}

fn fixed_courses() -> Vec<CourseRecord> {
    vec![
        CourseRecord::new(1, "Analisi Matematica I", 28.0, 9, "2023-02-14"),
        CourseRecord::new(2, "Reti di Calcolatori", 30.0, 6, "2023-07-03"),
        CourseRecord::new(3, "Basi di Dati", 26.0, 9, "2024-01-22"),
    ]
}

struct World {
    authority: Authority,
    issuer: Issuer,
    wallet: Wallet,
    credential_id: CredentialId,
    verifier: Verifier,
    registry: RevocationRegistry,
    _dir: tempfile::TempDir,
}

fn setup() -> World {
    let _ = env_logger::builder().is_test(true).try_init();

    let authority = Authority::with_keypair("Accreditation Authority", test_keypair());
    let issuer = Issuer::new("universite-de-rennes", test_keypair(), &authority)
        .expect("issuer certification should succeed");

    let mut wallet = Wallet::with_keypair("mario", test_keypair()).expect("wallet creation");
    let credential = issuer
        .issue_credential(wallet.pseudonym(), fixed_courses())
        .expect("issuance should succeed");
    let credential_id = credential.credential_id.clone();
    wallet.receive(credential).expect("wallet should accept its credential");

    let mut verifier = Verifier::new("universita-di-salerno");
    verifier.trust_authority(&authority);

    let dir = tempfile::tempdir().unwrap();
    let registry = RevocationRegistry::open(dir.path().join("revocation_list.json")).unwrap();

    World {
        authority,
        issuer,
        wallet,
        credential_id,
        verifier,
        registry,
        _dir: dir,
    }
}

#[test]
fn scenario_a_happy_path() {
    let w = setup();
    let vp = w
        .wallet
        .create_presentation(&w.credential_id, 2)
        .expect("presentation should succeed");

    assert_eq!(vp.presented_course.name, "Reti di Calcolatori");

    let report = w
        .verifier
        .verify_presentation(&vp, &w.registry)
        .expect("presentation should be accepted");
    assert_eq!(report.credential_id, w.credential_id);
    assert_eq!(report.issuer_identifier, "universite-de-rennes");
    assert_eq!(report.authority_identifier, w.authority.name());
    assert_eq!(report.stages.last(), Some(&VerificationStage::Accepted));
}

#[test]
fn scenario_a_every_course_discloses() {
    let w = setup();
    for course in fixed_courses() {
        let vp = w.wallet.create_presentation(&w.credential_id, course.id).unwrap();
        assert_eq!(vp.presented_course, course);
        assert!(w.verifier.verify_presentation(&vp, &w.registry).is_ok());
    }
}

#[test]
fn scenario_a_survives_the_wire() {
    let w = setup();
    let vp = w.wallet.create_presentation(&w.credential_id, 3).unwrap();
    let json = vp.to_json().unwrap();
    let received = academic_credential::VerifiablePresentation::from_json(&json).unwrap();
    assert!(w.verifier.verify_presentation(&received, &w.registry).is_ok());

    let credential = w.wallet.credential(&w.credential_id).unwrap();
    let copy = Credential::from_json(&credential.to_json().unwrap()).unwrap();
    let vp = academic_credential::present(&copy, 1).unwrap();
    assert!(w.verifier.verify_presentation(&vp, &w.registry).is_ok());
}

#[test]
fn scenario_b_tampered_grade() {
    let w = setup();
    let mut vp = w.wallet.create_presentation(&w.credential_id, 2).unwrap();
    vp.presented_course.grade = 18.0;

    let err = w.verifier.verify_presentation(&vp, &w.registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MerkleProof);
}

#[test]
fn scenario_b_swapped_course_with_foreign_proof() {
    let w = setup();
    let vp_one = w.wallet.create_presentation(&w.credential_id, 1).unwrap();
    let mut vp_two = w.wallet.create_presentation(&w.credential_id, 2).unwrap();
    vp_two.merkle_proof = vp_one.merkle_proof;

    let err = w.verifier.verify_presentation(&vp_two, &w.registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MerkleProof);
}

#[test]
fn scenario_c_forged_signature() {
    let w = setup();
    let outsider = test_keypair();

    let fake_courses = vec![CourseRecord::new(2, "Reti di Calcolatori", 30.0, 6, "2023-07-03")];
    let fake_tree = MerkleTree::build(&fake_courses).unwrap();
    let public_part = VerifiableCredentialPublicPart {
        credential_id: CredentialId::generate(),
        issuer_identifier: w.issuer.identifier().to_string(),
        student_pseudonym: "forged".into(),
        merkle_root: fake_tree.root().unwrap().clone(),
        issue_date: "2024-09-01T00:00:00.000000Z".into(),
    };

    let mut vp = w.wallet.create_presentation(&w.credential_id, 2).unwrap();
    vp.merkle_proof = fake_tree.proof_for(&fake_courses[0]).unwrap();
    vp.credential_signature = signing::sign(outsider.private_key(), &public_part).unwrap();
    vp.public_part = public_part;
    // Real certificate, reused verbatim.
    assert_eq!(&vp.issuer_certificate, w.issuer.certificate());

    let run = w.verifier.start(&vp, &w.registry).advance().expect("trust check passes");
    assert_eq!(run.stage(), VerificationStage::TrustChecked);
    let err = run.advance().err().expect("signature check must fail");
    assert_eq!(err.kind(), ErrorKind::SignatureVerification);

    let err = w.verifier.verify_presentation(&vp, &w.registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureVerification);
}

#[test]
fn scenario_c_forged_certificate() {
    let w = setup();
    let outsider = test_keypair();

    let mut vp = w.wallet.create_presentation(&w.credential_id, 2).unwrap();
    vp.issuer_certificate.data.issuer_public_key = outsider.public_key_pem().unwrap();
    vp.credential_signature = signing::sign(outsider.private_key(), &vp.public_part).unwrap();

    let err = w.verifier.verify_presentation(&vp, &w.registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureVerification);
}

#[test]
fn scenario_d_revocation() {
    let w = setup();
    let vp = w.wallet.create_presentation(&w.credential_id, 2).unwrap();
    assert!(w.verifier.verify_presentation(&vp, &w.registry).is_ok());

    w.issuer
        .revoke_credential(&w.registry, &w.credential_id)
        .expect("revocation should persist");

    let fresh = w.wallet.create_presentation(&w.credential_id, 2).unwrap();
    let err = w.verifier.verify_presentation(&fresh, &w.registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialRevoked);

    // Still revoked for a registry reloaded from the same store.
    let reloaded = RevocationRegistry::open(w.registry.path()).unwrap();
    let err = w.verifier.verify_presentation(&fresh, &reloaded).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialRevoked);
}

#[test]
fn scenario_e_untrusted_issuer() {
    let w = setup();
    let stranger = Verifier::new("untrusting-verifier");

    let vp = w.wallet.create_presentation(&w.credential_id, 1).unwrap();
    let err = stranger.verify_presentation(&vp, &w.registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UntrustedAuthority);

    // Trust is decided before any signature is looked at.
    let mut broken = vp.clone();
    broken.issuer_certificate.signature = signing::Signature::from_bytes(vec![0; 4]);
    broken.credential_signature = signing::Signature::from_bytes(Vec::new());
    let err = stranger.verify_presentation(&broken, &w.registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UntrustedAuthority);
}

#[test]
fn authority_name_collision_is_signature_failure() {
    let w = setup();
    let impostor = Authority::with_keypair(w.authority.name(), test_keypair());
    let mut verifier = Verifier::new("confused-verifier");
    verifier.trust_authority(&impostor);

    let vp = w.wallet.create_presentation(&w.credential_id, 1).unwrap();
    let err = verifier.verify_presentation(&vp, &w.registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SignatureVerification);
}
