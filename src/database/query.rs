//! Filtered-read parameters for the REST API's query convention.

/// `orderBy` value that sorts by the immediate node keys.
pub const ORDER_BY_KEY: &str = "$key";
/// `orderBy` value that sorts by the immediate node values.
pub const ORDER_BY_VALUE: &str = "$value";
/// `orderBy` value that sorts by node priority.
pub const ORDER_BY_PRIORITY: &str = "$priority";

/// A definition of a filtered read: which element orders the result, and the
/// match, range, and limit constraints applied against it.
///
/// Built independently of a client, so it can be reused across calls:
///
/// ```rust
/// use firebase_rtdb::{Filter, ORDER_BY_KEY};
///
/// let first_room = Filter::order_by(ORDER_BY_KEY).limit_to_first(1);
/// ```
#[derive(Clone, Debug)]
pub struct Filter {
    order_by: String,
    equal_to: Option<String>,
    start_at: Option<String>,
    end_at: Option<String>,
    limit_to_first: Option<u32>,
    limit_to_last: Option<u32>,
}

impl Filter {
    /// Creates a filter ordered by `element`: a child key name, a grand-child
    /// key path, or one of [`ORDER_BY_KEY`], [`ORDER_BY_VALUE`],
    /// [`ORDER_BY_PRIORITY`].
    pub fn order_by(element: impl Into<String>) -> Self {
        Self {
            order_by: element.into(),
            equal_to: None,
            start_at: None,
            end_at: None,
            limit_to_first: None,
            limit_to_last: None,
        }
    }

    /// Keeps only nodes whose ordered element equals `value`.
    ///
    /// `value` (like `start_at`/`end_at`) is passed through verbatim, so it
    /// must already be a JSON literal in the remote schema's type — e.g.
    /// `"\"Room A\""` for a string element, `"17"` for a number.
    pub fn equal_to(mut self, value: impl Into<String>) -> Self {
        self.equal_to = Some(value.into());
        self
    }

    /// Range start (inclusive) against the ordered element.
    pub fn start_at(mut self, value: impl Into<String>) -> Self {
        self.start_at = Some(value.into());
        self
    }

    /// Range end (inclusive) against the ordered element.
    pub fn end_at(mut self, value: impl Into<String>) -> Self {
        self.end_at = Some(value.into());
        self
    }

    /// Restricts the result to the first `limit` matching nodes.
    pub fn limit_to_first(mut self, limit: u32) -> Self {
        self.limit_to_first = Some(limit);
        self
    }

    /// Restricts the result to the last `limit` matching nodes.
    pub fn limit_to_last(mut self, limit: u32) -> Self {
        self.limit_to_last = Some(limit);
        self
    }

    /// Flat name/value token list for [`FirebaseDb::send`].
    ///
    /// The `orderBy` value is quoted as a JSON string literal; unset
    /// parameters are omitted entirely.
    ///
    /// [`FirebaseDb::send`]: super::FirebaseDb::send
    pub(crate) fn to_query_params(&self) -> Vec<String> {
        let mut params = vec!["orderBy".to_string(), format!("\"{}\"", self.order_by)];

        if let Some(value) = &self.equal_to {
            params.push("equalTo".to_string());
            params.push(value.clone());
        }
        if let Some(value) = &self.start_at {
            params.push("startAt".to_string());
            params.push(value.clone());
        }
        if let Some(value) = &self.end_at {
            params.push("endAt".to_string());
            params.push(value.clone());
        }
        if let Some(limit) = self.limit_to_first {
            params.push("limitToFirst".to_string());
            params.push(limit.to_string());
        }
        if let Some(limit) = self.limit_to_last {
            params.push("limitToLast".to_string());
            params.push(limit.to_string());
        }

        params
    }
}
