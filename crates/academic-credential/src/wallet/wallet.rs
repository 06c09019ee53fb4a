//! Student wallet.
//!
//! The wallet's pseudonym is the SHA-256 of its public key PEM, so
//! credentials name the holder without revealing who they are.

use std::collections::HashMap;

use crate::credential::{Credential, CredentialId};
use crate::crypto::canonical::hash_bytes;
use crate::crypto::keys::KeyPair;
use crate::error::{CredentialError, Result};

use super::presentation::{present, VerifiablePresentation};

/// Holds a student's key pair and received credentials.
#[derive(Debug)]
pub struct Wallet {
    owner: String,
    key_pair: KeyPair,
    pseudonym: String,
    credentials: HashMap<CredentialId, Credential>,
}

impl Wallet {
    /// Create a wallet with a freshly generated default key pair.
    pub fn new(owner: impl Into<String>) -> Result<Self> {
        Self::with_keypair(owner, KeyPair::generate()?)
    }

    /// Create a wallet around an existing key pair.
    pub fn with_keypair(owner: impl Into<String>, key_pair: KeyPair) -> Result<Self> {
        let pseudonym = hash_bytes(key_pair.public_key_pem()?.as_bytes()).0;
        Ok(Self {
            owner: owner.into(),
            key_pair,
            pseudonym,
            credentials: HashMap::new(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Pseudonym to hand to issuers.
    pub fn pseudonym(&self) -> &str {
        &self.pseudonym
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Store a credential issued to this wallet.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::InvalidCredential` if the credential names
    /// another pseudonym, or `CredentialError::SignatureVerification` if its
    /// issuer signature does not check out.
    pub fn receive(&mut self, credential: Credential) -> Result<()> {
        if credential.student_pseudonym != self.pseudonym {
            return Err(CredentialError::InvalidCredential(format!(
                "credential {} was issued to another pseudonym",
                credential.credential_id
            )));
        }
        credential.verify_signature()?;

        log::info!(
            "wallet of '{}' received credential {}",
            self.owner,
            credential.credential_id
        );
        self.credentials
            .insert(credential.credential_id.clone(), credential);
        Ok(())
    }

    /// Look up a stored credential.
    pub fn credential(&self, credential_id: &CredentialId) -> Option<&Credential> {
        self.credentials.get(credential_id)
    }

    /// Ids of all stored credentials, sorted.
    pub fn credential_ids(&self) -> Vec<CredentialId> {
        let mut ids: Vec<CredentialId> = self.credentials.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Disclose one course of a stored credential.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::CredentialNotFound` for an unknown
    /// credential, or `CredentialError::CourseNotFound` for an unknown course.
    pub fn create_presentation(
        &self,
        credential_id: &CredentialId,
        course_id: i64,
    ) -> Result<VerifiablePresentation> {
        let credential = self
            .credential(credential_id)
            .ok_or_else(|| CredentialError::CredentialNotFound(credential_id.to_string()))?;
        present(credential, course_id)
    }
}
