//! Multi-path patch builder.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use super::{Error, FirebaseDb};

/// Accumulates writes to several subpaths under one base path, committed with
/// a single PATCH so the remote service applies them atomically.
///
/// Adding the same subpath twice silently overwrites the earlier value.
pub struct MultiPathPatch<'a> {
    db: &'a FirebaseDb,
    path: String,
    updates: HashMap<String, Value>,
}

impl<'a> MultiPathPatch<'a> {
    pub(crate) fn new(db: &'a FirebaseDb, path: String) -> Self {
        Self {
            db,
            path,
            updates: HashMap::new(),
        }
    }

    /// Base path the patch commits against.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Records a write of `value` at `subpath`, relative to the base path.
    pub fn add<T: Serialize>(
        mut self,
        subpath: impl Into<String>,
        value: T,
    ) -> Result<Self, Error> {
        self.updates.insert(subpath.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Commits every recorded write in one PATCH against the base path.
    pub async fn apply(self) -> Result<(), Error> {
        self.db.patch(&self.path, &self.updates).await
    }
}
