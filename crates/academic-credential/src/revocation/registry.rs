//! Revocation registry persistence.
//!
//! The backing store is a single JSON file holding an array of credential
//! id strings, rewritten wholesale on every new revocation:
//!
//! ```json
//! [
//!   "0f8fad5b-d9cb-469f-a165-70867728950e",
//!   "7c9e6679-7425-40de-944b-e07fc1f90ae7"
//! ]
//! ```
//!
//! Writes go to a sibling `.tmp` file which is synced and then renamed over
//! the store, after which the containing directory is synced too. A crash
//! never leaves a half-written array behind, and a completed `add` survives
//! one.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::credential::CredentialId;
use crate::error::{CredentialError, Result};

// ── Load policy ───────────────────────────────────────────────────────────────

/// What to do when the backing store exists but cannot be read or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Start empty, log a warning and move the unreadable file aside to
    /// `<path>.corrupt.<micros>`.
    #[default]
    Lenient,
    /// Fail with `CredentialError::Storage`.
    Strict,
}

// ── RevocationRegistry ────────────────────────────────────────────────────────

/// File-backed, append-only set of revoked credential ids.
///
/// Safe to share between threads: `add` takes an exclusive lock for the
/// whole read-modify-write, `is_revoked` only a shared one.
#[derive(Debug)]
pub struct RevocationRegistry {
    path: PathBuf,
    revoked: RwLock<BTreeSet<CredentialId>>,
}

impl RevocationRegistry {
    /// Open the registry at `path` with [`LoadPolicy::Lenient`].
    ///
    /// A missing file yields an empty registry; nothing is written until
    /// the first `add`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_policy(path, LoadPolicy::Lenient)
    }

    /// Open the registry at `path` with an explicit load policy.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Storage` under [`LoadPolicy::Strict`] if
    /// the file exists but cannot be read or parsed.
    pub fn open_with_policy(path: impl Into<PathBuf>, policy: LoadPolicy) -> Result<Self> {
        let path = path.into();
        let revoked = match load(&path) {
            Ok(ids) => ids,
            Err(e) => match policy {
                LoadPolicy::Strict => return Err(e),
                LoadPolicy::Lenient => {
                    log::warn!(
                        "cannot load revocation store '{}': {e}; starting with an empty registry",
                        path.display()
                    );
                    let _ = quarantine(&path);
                    BTreeSet::new()
                }
            },
        };

        log::info!(
            "revocation registry opened at '{}' with {} revocations",
            path.display(),
            revoked.len()
        );

        Ok(Self {
            path,
            revoked: RwLock::new(revoked),
        })
    }

    /// Revoke `credential_id`. Idempotent.
    ///
    /// The updated set is durably written before this returns. If the
    /// write fails the in-memory insertion is rolled back.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Io` or `CredentialError::Serialization` if
    /// the store cannot be rewritten.
    pub fn add(&self, credential_id: &CredentialId) -> Result<()> {
        let mut revoked = self.revoked.write().unwrap_or_else(PoisonError::into_inner);
        if revoked.contains(credential_id) {
            return Ok(());
        }

        revoked.insert(credential_id.clone());
        if let Err(e) = persist(&self.path, &revoked) {
            revoked.remove(credential_id);
            return Err(e);
        }

        log::info!("revoked credential {credential_id}");
        Ok(())
    }

    /// Return `true` if `credential_id` has been revoked.
    pub fn is_revoked(&self, credential_id: &CredentialId) -> bool {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(credential_id)
    }

    /// Number of revoked ids.
    pub fn len(&self) -> usize {
        self.revoked.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted snapshot of all revoked ids.
    pub fn revoked_ids(&self) -> Vec<CredentialId> {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Path of the backing store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn load(path: &Path) -> Result<BTreeSet<CredentialId>> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }

    let bytes = std::fs::read(path).map_err(|e| {
        CredentialError::Storage(format!("failed to read {}: {e}", path.display()))
    })?;
    let ids: Vec<CredentialId> = serde_json::from_slice(&bytes).map_err(|e| {
        CredentialError::Storage(format!("failed to parse {}: {e}", path.display()))
    })?;
    Ok(ids.into_iter().collect())
}

fn persist(path: &Path, revoked: &BTreeSet<CredentialId>) -> Result<()> {
    std::fs::create_dir_all(parent_dir(path))?;

    let json = serde_json::to_vec_pretty(revoked)?;
    let tmp = sibling(path, ".tmp");
    {
        let mut file = std::fs::File::create(&tmp)?;
        file.write_all(&json)?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp, path)?;
    sync_dir(parent_dir(path))?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

// The rename is only durable once the directory entry is on disk.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    std::fs::File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

/// Move an unreadable store to `<path>.corrupt.<micros>`, never replacing
/// an earlier quarantined file.
fn quarantine(path: &Path) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }
    let aside = quarantine_target(path)?;
    match std::fs::rename(path, &aside) {
        Ok(()) => {
            log::warn!("moved unreadable revocation store to '{}'", aside.display());
            Some(aside)
        }
        Err(e) => {
            log::warn!("could not move unreadable revocation store aside: {e}");
            None
        }
    }
}

fn quarantine_target(path: &Path) -> Option<PathBuf> {
    let stamp = crate::time::now_micros();
    let target = (0..1000u32)
        .map(|n| match n {
            0 => sibling(path, &format!(".corrupt.{stamp}")),
            n => sibling(path, &format!(".corrupt.{stamp}.{n}")),
        })
        .find(|candidate| !candidate.exists());
    if target.is_none() {
        log::warn!("no free quarantine name next to '{}'", path.display());
    }
    target
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
