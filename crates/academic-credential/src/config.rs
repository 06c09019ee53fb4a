//! Configuration for key generation and the revocation store.
//!
//! Values come from [`ProtocolConfig::default`], a JSON file, or
//! `ACRED_*` environment variables layered over the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::keys::{KeyPair, DEFAULT_KEY_BITS, DEFAULT_PUBLIC_EXPONENT};
use crate::error::{CredentialError, Result};
use crate::revocation::{LoadPolicy, RevocationRegistry};

/// Default revocation store location, relative to the working directory.
pub const DEFAULT_REGISTRY_PATH: &str = "revocation_list.json";

pub const ENV_KEY_BITS: &str = "ACRED_KEY_BITS";
pub const ENV_PUBLIC_EXPONENT: &str = "ACRED_PUBLIC_EXPONENT";
pub const ENV_REGISTRY_PATH: &str = "ACRED_REGISTRY_PATH";
pub const ENV_REGISTRY_LOAD: &str = "ACRED_REGISTRY_LOAD";

/// Protocol configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// RSA modulus size for generated key pairs.
    pub key_bits: usize,
    /// RSA public exponent for generated key pairs.
    pub public_exponent: u64,
    /// Revocation store file.
    pub registry_path: PathBuf,
    /// Behaviour when the revocation store cannot be loaded.
    pub registry_load: LoadPolicy,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            registry_load: LoadPolicy::Lenient,
        }
    }
}

impl ProtocolConfig {
    /// Load from a JSON file. Omitted fields take their default.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            CredentialError::Config(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Defaults overlaid with `ACRED_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with values from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup(ENV_KEY_BITS) {
            config.key_bits = parse_var(ENV_KEY_BITS, &v)?;
        }
        if let Some(v) = lookup(ENV_PUBLIC_EXPONENT) {
            config.public_exponent = parse_var(ENV_PUBLIC_EXPONENT, &v)?;
        }
        if let Some(v) = lookup(ENV_REGISTRY_PATH) {
            config.registry_path = PathBuf::from(v);
        }
        if let Some(v) = lookup(ENV_REGISTRY_LOAD) {
            config.registry_load = match v.trim().to_ascii_lowercase().as_str() {
                "lenient" => LoadPolicy::Lenient,
                "strict" => LoadPolicy::Strict,
                other => {
                    return Err(CredentialError::Config(format!(
                        "{ENV_REGISTRY_LOAD} must be 'lenient' or 'strict', got '{other}'"
                    )))
                }
            };
        }

        Ok(config)
    }

    /// Generate a key pair with the configured size and exponent.
    pub fn generate_keypair(&self) -> Result<KeyPair> {
        KeyPair::generate_with(self.key_bits, self.public_exponent)
    }

    /// Open the configured revocation registry.
    pub fn open_registry(&self) -> Result<RevocationRegistry> {
        RevocationRegistry::open_with_policy(&self.registry_path, self.registry_load)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| CredentialError::Config(format!("invalid {name} '{value}': {e}")))
}
