//! Course records, the leaf payloads of a credential.

use serde::{Deserialize, Serialize};

use crate::crypto::canonical::{canonical_json, Canonical};
use crate::error::Result;

/// A single completed course.
///
/// Hashing goes through canonical serialization, so field declaration
/// order has no effect on the leaf hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course identifier, unique within a credential.
    pub id: i64,
    /// Course name.
    pub name: String,
    /// Final grade.
    pub grade: f64,
    /// Credits awarded.
    pub credits: u32,
    /// Completion date.
    pub date: String,
}

impl CourseRecord {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        grade: f64,
        credits: u32,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            grade,
            credits,
            date: date.into(),
        }
    }
}

impl Canonical for CourseRecord {
    fn canonical_bytes(&self) -> Result<Vec<u8>> {
        canonical_json(self)
    }
}
