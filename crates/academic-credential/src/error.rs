//! Error types for academic credentials.
//!
//! Every protocol failure is a distinct variant so that a caller can branch
//! on *why* an operation failed. Private key material is never included in
//! error messages.

/// Credential error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Signature verification failed")]
    SignatureVerification,

    #[error("Untrusted authority: {0}")]
    UntrustedAuthority(String),

    #[error("Merkle inclusion proof does not fold to the claimed root")]
    MerkleProof,

    #[error("Credential has been revoked: {0}")]
    CredentialRevoked(String),

    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fieldless tag for a [`CredentialError`], convenient for `match` and
/// equality assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SignatureVerification,
    UntrustedAuthority,
    MerkleProof,
    CredentialRevoked,
    CredentialNotFound,
    CourseNotFound,
    InvalidCredential,
    InvalidKey,
    Serialization,
    Storage,
    Config,
    Io,
}

impl CredentialError {
    /// Return the kind of this error without its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SignatureVerification => ErrorKind::SignatureVerification,
            Self::UntrustedAuthority(_) => ErrorKind::UntrustedAuthority,
            Self::MerkleProof => ErrorKind::MerkleProof,
            Self::CredentialRevoked(_) => ErrorKind::CredentialRevoked,
            Self::CredentialNotFound(_) => ErrorKind::CredentialNotFound,
            Self::CourseNotFound(_) => ErrorKind::CourseNotFound,
            Self::InvalidCredential(_) => ErrorKind::InvalidCredential,
            Self::InvalidKey(_) => ErrorKind::InvalidKey,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for CredentialError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CredentialError>;
