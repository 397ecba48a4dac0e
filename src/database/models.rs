use serde::{Deserialize, Serialize};

/// Response envelope for POST writes; `name` holds the generated child key.
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub name: String,
}

/// Placeholder written in place of a value and substituted by the database at
/// commit time.
///
/// Serializes to the sentinel object the REST API recognizes, e.g.
/// `{".sv":"timestamp"}` for [`ServerValue::TIMESTAMP`]. The client never
/// interprets the substituted result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerValue {
    #[serde(rename = ".sv")]
    sv: &'static str,
}

impl ServerValue {
    /// Replaced server-side with the write time, in epoch milliseconds.
    pub const TIMESTAMP: ServerValue = ServerValue { sv: "timestamp" };
}
