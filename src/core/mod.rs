pub mod middleware;

use serde::Deserialize;

/// Error envelope returned by the Realtime Database REST API on non-success
/// responses, e.g. `{"error": "Permission denied"}`.
#[derive(Debug, Deserialize)]
pub struct RtdbErrorResponse {
    pub error: String,
}

pub async fn parse_error_response(response: reqwest::Response, default_msg: &str) -> String {
    let status = response.status();
    match response.json::<RtdbErrorResponse>().await {
        Ok(error_resp) => error_resp.error,
        Err(_) => format!("{}: {}", default_msg, status),
    }
}
