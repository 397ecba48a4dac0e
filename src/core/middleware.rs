use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Appends the database credential as the `auth` query parameter on every
/// outgoing request, after any parameters already present on the URL.
///
/// The Realtime Database REST API authenticates with `?auth=<token>` rather
/// than an `Authorization` header; the token is either the legacy database
/// secret or a Firebase ID token.
pub struct AuthMiddleware {
    token: String,
}

impl AuthMiddleware {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait::async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair("auth", &self.token);

        next.run(req, extensions).await
    }
}
