//! Firebase Realtime Database REST client.
//!
//! This crate talks to the Realtime Database [REST API]: every node in the JSON
//! tree is addressed by its path, and each operation is one authenticated HTTP
//! round trip. The database engine itself (storage, query evaluation, ordering,
//! conflict resolution) lives entirely on the Firebase side.
//!
//! [REST API]: https://firebase.google.com/docs/database/rest/start
//!
//! # Examples
//!
//! ```rust,no_run
//! use firebase_rtdb::{FirebaseService, ServerValue};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), firebase_rtdb::Error> {
//! let service = FirebaseService::new(
//!     "https://demo.firebaseio.com",
//!     Some("database-secret".to_string()),
//! );
//! let db = service.database();
//!
//! // POST generates a child key under the given path.
//! let id = db
//!     .post("/rooms", &json!({
//!         "label": "Room A",
//!         "created_on": ServerValue::TIMESTAMP,
//!     }))
//!     .await?;
//!
//! // Write several subpaths in one atomic PATCH.
//! db.patch_multi_path("/rooms")
//!     .add(format!("{id}/label"), "Room A1")?
//!     .add(format!("{id}/open"), true)?
//!     .apply()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod database;

pub use database::key::{is_valid_key, MAX_KEY_BYTES};
pub use database::models::ServerValue;
pub use database::query::{Filter, ORDER_BY_KEY, ORDER_BY_PRIORITY, ORDER_BY_VALUE};
pub use database::{Error, FirebaseDb};

/// Connection settings for one Realtime Database instance: the instance base
/// URL and an optional auth credential (database secret or ID token).
///
/// Immutable once constructed; hand out clients with [`FirebaseService::database`].
#[derive(Clone)]
pub struct FirebaseService {
    base_url: String,
    auth_token: Option<String>,
}

impl FirebaseService {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Creates a database client bound to this instance.
    ///
    /// Each client owns its own HTTP connection pool, released when the client
    /// is dropped.
    pub fn database(&self) -> FirebaseDb {
        FirebaseDb::new(self)
    }
}
