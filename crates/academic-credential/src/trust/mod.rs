//! Trust model — accreditation of issuers by an authority.
//!
//! The trust module provides:
//! - `CertificateData`, the {issuer identifier, issuer public key} binding
//! - `Certificate`, that binding signed by an accrediting authority
//! - `Authority`, the root trust anchor that certifies issuers
//!
//! Certificates are transferable: anyone holding the authority's public
//! key can check them without contacting the authority.

pub mod authority;
pub mod certificate;

pub use authority::Authority;
pub use certificate::{Certificate, CertificateData};
