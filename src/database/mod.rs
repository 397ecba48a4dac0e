//! Realtime Database module.
//!
//! This module provides the CRUD surface of the Realtime Database REST API.
//! Paths address nodes in the remote JSON tree; values are anything
//! serde-serializable. Writes either replace a node (`put`), merge children
//! into it (`patch`), or append under a generated child key (`post`).
//!
//! # Examples
//!
//! ```rust,no_run
//! # use firebase_rtdb::FirebaseService;
//! # async fn run(service: FirebaseService) {
//! let db = service.database();
//!
//! let _ = db.put("/rooms/1", &serde_json::json!({ "label": "Room A" })).await;
//! let _ = db.get("/rooms", true).await;
//! # }
//! ```

pub mod key;
pub mod models;
pub mod patch;
pub mod query;

use crate::core::middleware::AuthMiddleware;
use crate::core::parse_error_response;
use crate::FirebaseService;
use models::PostResponse;
use patch::MultiPathPatch;
use query::Filter;
use reqwest::{header, Client, Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[cfg(test)]
mod tests;

/// Errors that can occur during Realtime Database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The flat query-parameter list did not pair up.
    #[error("query parameters have to be provided as an even number of name-value tokens")]
    UnbalancedQueryParams,
    /// The base URL and path did not form a valid request URL.
    #[error("invalid database URL: {0}")]
    Url(#[from] url::ParseError),
    /// Wrapper for `reqwest_middleware::Error`.
    #[error("an error occurred while sending the request: {0}")]
    Request(#[from] reqwest_middleware::Error),
    /// Wrapper for `reqwest::Error`.
    #[error("an error occurred while sending the request: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Wrapper for `serde_json::Error`.
    #[error("an error occurred while serializing/deserializing JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Non-success status returned by the database.
    #[error("the realtime database returned an error: {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Client for one Realtime Database instance.
///
/// Owns the HTTP connection pool; dropping the client releases it. The client
/// is `Send + Sync` and calls may be issued concurrently, but no coordination
/// between concurrent writes happens on this side of the wire.
pub struct FirebaseDb {
    client: ClientWithMiddleware,
    base_url: String,
}

impl FirebaseDb {
    /// Creates a new `FirebaseDb` instance.
    ///
    /// This is typically called via `FirebaseService::database()`.
    pub fn new(service: &FirebaseService) -> Self {
        let mut builder = ClientBuilder::new(Client::new());
        if let Some(token) = service.auth_token() {
            builder = builder.with(AuthMiddleware::new(token));
        }

        Self {
            client: builder.build(),
            base_url: service.base_url().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a new `FirebaseDb` instance with a custom client and base URL.
    /// Internal use only, primarily for testing.
    #[allow(dead_code)]
    pub(crate) fn new_with_client(client: ClientWithMiddleware, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds and sends one request, returning the raw response.
    ///
    /// `query` is a flat list of name/value tokens (`["shallow", "true"]`);
    /// an odd number of tokens fails before anything is sent. The `.json`
    /// suffix required by the REST API is appended to `path` if absent. When
    /// the service carries an auth token, `auth=<token>` is merged into the
    /// query string at send time.
    ///
    /// # Errors
    ///
    /// Returns an error on an unbalanced token list, a malformed URL, a
    /// transport failure, or a non-success status code. There is no retry.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        query: &[&str],
    ) -> Result<reqwest::Response, Error> {
        if query.len() % 2 == 1 {
            return Err(Error::UnbalancedQueryParams);
        }

        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))?;
        if !url.path().ends_with(".json") {
            let suffixed = format!("{}.json", url.path());
            url.set_path(&suffixed);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for pair in query.chunks(2) {
                pairs.append_pair(pair[0], pair[1]);
            }
        }

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let message = parse_error_response(response, "request failed").await;
            return Err(Error::Api { status, message });
        }

        Ok(response)
    }

    /// Writes `value` at `path`, replacing whatever node is there.
    pub async fn put<T: Serialize>(&self, path: &str, value: &T) -> Result<(), Error> {
        self.put_raw(path, &serde_json::to_string(value)?).await
    }

    /// `put` with a pre-serialized JSON body.
    pub async fn put_raw(&self, path: &str, json_value: &str) -> Result<(), Error> {
        let response = self
            .send(Method::PUT, path, Some(json_value.to_string()), &[])
            .await?;
        debug!(status = %response.status(), path, "put acknowledged");
        Ok(())
    }

    /// Merges the children of `value` into the node at `path`. Children not
    /// named in `value` are left untouched.
    pub async fn patch<T: Serialize>(&self, path: &str, value: &T) -> Result<(), Error> {
        self.patch_raw(path, &serde_json::to_string(value)?).await
    }

    /// `patch` with a pre-serialized JSON body.
    pub async fn patch_raw(&self, path: &str, json_value: &str) -> Result<(), Error> {
        let response = self
            .send(Method::PATCH, path, Some(json_value.to_string()), &[])
            .await?;
        debug!(status = %response.status(), path, "patch acknowledged");
        Ok(())
    }

    /// Starts a multi-path patch rooted at `path`: accumulate subpath writes
    /// with [`MultiPathPatch::add`], then commit them in one PATCH with
    /// [`MultiPathPatch::apply`].
    pub fn patch_multi_path(&self, path: impl Into<String>) -> MultiPathPatch<'_> {
        MultiPathPatch::new(self, path.into())
    }

    /// Appends `value` under a generated child key at `path` and returns the
    /// key (the `name` field of the response envelope).
    pub async fn post<T: Serialize>(&self, path: &str, value: &T) -> Result<String, Error> {
        let body = self.post_raw(path, &serde_json::to_string(value)?).await?;
        let response: PostResponse = serde_json::from_str(&body)?;
        Ok(response.name)
    }

    /// `post` with a pre-serialized JSON body; returns the raw response text.
    pub async fn post_raw(&self, path: &str, json_value: &str) -> Result<String, Error> {
        let response = self
            .send(Method::POST, path, Some(json_value.to_string()), &[])
            .await?;
        Ok(response.text().await?)
    }

    /// Removes the node at `path`.
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let response = self.send(Method::DELETE, path, None, &[]).await?;
        debug!(status = %response.status(), path, "delete acknowledged");
        Ok(())
    }

    /// Retrieves the node(s) at `path` as raw JSON text.
    ///
    /// With `shallow` set, only the first-level children are returned, each
    /// as a boolean marking its existence.
    pub async fn get(&self, path: &str, shallow: bool) -> Result<String, Error> {
        let shallow = if shallow { "true" } else { "false" };
        let response = self
            .send(Method::GET, path, None, &["shallow", shallow])
            .await?;
        Ok(response.text().await?)
    }

    /// Retrieves the node(s) at `path` matching `filter`, as raw JSON text.
    ///
    /// See [`Filter`] for the ordering, range, and limit parameters of the
    /// REST API's filtered-read convention.
    pub async fn get_filtered(&self, path: &str, filter: &Filter) -> Result<String, Error> {
        let params = filter.to_query_params();
        let tokens: Vec<&str> = params.iter().map(String::as_str).collect();
        let response = self.send(Method::GET, path, None, &tokens).await?;
        Ok(response.text().await?)
    }
}
