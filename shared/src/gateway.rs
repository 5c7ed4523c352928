//! Typed boundary between the client core and the REST API.
//!
//! The gateway builds requests, attaches the bearer token for admin calls and
//! turns every response into either a decoded value or an [`ApiError`]. The
//! wire itself is behind [`HttpTransport`] so the browser and the CLI can
//! plug in their own HTTP stacks.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use crate::{
    admin::AdminQuery,
    config::ClientConfig,
    error::ApiError,
    model::{AdminSubmissionPage, AnalyticsSnapshot, Rating, Submission, SubmissionReceipt},
    session::{Credential, SessionStore},
};

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl HttpMethod {
    /// Upper-case verb.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A fully built request, ready for the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Verb.
    pub method: HttpMethod,
    /// Absolute URL including the query string.
    pub url: String,
    /// Token for the `Authorization: Bearer` header.
    pub bearer: Option<String>,
    /// JSON body.
    pub body: Option<String>,
}

impl HttpRequest {
    fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            bearer: None,
            body: None,
        }
    }

    fn post_json(url: String, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            bearer: None,
            body: Some(body),
        }
    }

    fn with_bearer(mut self, credential: &Credential) -> Self {
        self.bearer = Some(credential.as_str().to_string());
        self
    }
}

impl std::fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("authenticated", &self.bearer.is_some())
            .field("body", &self.body)
            .finish()
    }
}

/// Raw response: status code plus the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body, possibly empty.
    pub body: String,
}

/// Sends one request and reports the raw response.
///
/// `Err` means no response was received at all; any status code, including
/// 5xx, is an `Ok`.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Performs the round trip.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Client for the review API.
pub struct ApiGateway<T> {
    api_base: String,
    transport: T,
    session: SessionStore,
}

impl<T: HttpTransport> ApiGateway<T> {
    /// Gateway talking to `config.api_base` through `transport`.
    pub fn new(config: &ClientConfig, transport: T, session: SessionStore) -> Self {
        Self {
            api_base: config.api_base.clone(),
            transport,
            session,
        }
    }

    /// Session consulted for admin calls.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates a submission. Input is checked locally before any request.
    pub async fn submit_review(
        &self,
        rating: u8,
        review_text: &str,
    ) -> Result<SubmissionReceipt, ApiError> {
        let rating =
            Rating::new(rating).ok_or_else(|| ApiError::Validation("Please select a rating".into()))?;
        let review = review_text.trim();
        if review.is_empty() {
            return Err(ApiError::Validation("Please enter a review".into()));
        }

        let body = json!({ "rating": rating.get(), "review": review }).to_string();
        self.execute(HttpRequest::post_json(self.url("/api/submissions"), body))
            .await
    }

    /// Fetches the current state of one submission.
    pub async fn fetch_submission_status(&self, id: &str) -> Result<Submission, ApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::Validation("Missing submission id".into()));
        }
        let url = self.url(&format!("/api/submissions/{}", urlencoding::encode(id)));
        self.execute(HttpRequest::get(url)).await
    }

    /// Exchanges admin credentials for a bearer token. The token is returned,
    /// not stored; see [`crate::session::login`].
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, ApiError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(ApiError::Validation("Please enter both username and password".into()));
        }

        let body = json!({ "username": username, "password": password }).to_string();
        let response: LoginResponse = self
            .execute(HttpRequest::post_json(self.url("/api/admin/login"), body))
            .await?;
        Credential::new(response.access_token)
            .ok_or_else(|| ApiError::Network("unexpected response body: empty access token".into()))
    }

    /// One page of submissions matching `query`.
    pub async fn list_admin_submissions(
        &self,
        query: &AdminQuery,
    ) -> Result<AdminSubmissionPage, ApiError> {
        let credential = self.credential()?;
        let url = format!("{}?{}", self.url("/api/admin/submissions"), query.to_query_string());
        self.execute(HttpRequest::get(url).with_bearer(&credential))
            .await
    }

    /// Aggregate counts for the dashboard.
    pub async fn fetch_analytics(&self) -> Result<AnalyticsSnapshot, ApiError> {
        let credential = self.credential()?;
        self.execute(HttpRequest::get(self.url("/api/admin/analytics")).with_bearer(&credential))
            .await
    }

    fn credential(&self) -> Result<Credential, ApiError> {
        self.session.get().ok_or(ApiError::Unauthenticated)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self
            .transport
            .send(request)
            .await
            .map_err(ApiError::Network)?;
        decode_response(response)
    }
}

/// Classifies a raw response and decodes the success body.
pub fn decode_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    if !(200..300).contains(&response.status) {
        let err = ApiError::from_status(response.status, &response.body);
        tracing::debug!(status = response.status, error = %err, "request failed");
        return Err(err);
    }
    serde_json::from_str(&response.body)
        .map_err(|err| ApiError::Network(format!("unexpected response body: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        admin::FilterState,
        model::Status,
        testing::{submission_json, RecordingTransport},
    };

    fn gateway(transport: RecordingTransport, session: SessionStore) -> ApiGateway<RecordingTransport> {
        ApiGateway::new(&ClientConfig::new("http://api.test/"), transport, session)
    }

    fn signed_in() -> SessionStore {
        let session = SessionStore::in_memory();
        session.set(&Credential::new("tok").expect("credential"));
        session
    }

    #[tokio::test]
    async fn submit_posts_json_and_decodes_receipt() {
        let transport = RecordingTransport::new();
        transport.push_json(200, r#"{"submission_id":"s-1","status":"PENDING"}"#);
        let gateway = gateway(transport, SessionStore::in_memory());

        let receipt = gateway.submit_review(5, "  Great service  ").await.expect("submit");

        assert_eq!(receipt.submission_id, "s-1");
        assert_eq!(receipt.initial_status, Status::Pending);
        let sent = gateway.transport().requests();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].url, "http://api.test/api/submissions");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"rating":5,"review":"Great service"}"#));
        assert!(sent[0].bearer.is_none());
    }

    #[tokio::test]
    async fn submit_rejects_bad_input_without_network() {
        let gateway = gateway(RecordingTransport::new(), SessionStore::in_memory());

        let no_rating = gateway.submit_review(0, "text").await.expect_err("rating");
        let no_text = gateway.submit_review(3, "   ").await.expect_err("text");

        assert!(matches!(no_rating, ApiError::Validation(_)));
        assert!(matches!(no_text, ApiError::Validation(_)));
        assert_eq!(gateway.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn submit_server_rejection_is_validation() {
        let transport = RecordingTransport::new();
        transport.push_json(422, r#"{"detail":[{"msg":"Review cannot be empty"}]}"#);
        let gateway = gateway(transport, SessionStore::in_memory());

        let err = gateway.submit_review(3, "x").await.expect_err("422");

        assert_eq!(err, ApiError::Validation("Review cannot be empty".to_string()));
    }

    #[tokio::test]
    async fn status_fetch_classifies_404_and_5xx() {
        let transport = RecordingTransport::new();
        transport.push_json(404, r#"{"detail":"Submission not found"}"#);
        transport.push_json(502, "Bad Gateway");
        let gateway = gateway(transport, SessionStore::in_memory());

        let missing = gateway.fetch_submission_status("nope").await.expect_err("404");
        let broken = gateway.fetch_submission_status("nope").await.expect_err("502");

        assert_eq!(missing, ApiError::NotFound("Submission not found".to_string()));
        assert_eq!(
            broken,
            ApiError::Server {
                status: 502,
                message: "HTTP 502".to_string(),
            }
        );
        assert_eq!(gateway.transport().requests()[0].url, "http://api.test/api/submissions/nope");
    }

    #[tokio::test]
    async fn status_fetch_encodes_the_id() {
        let transport = RecordingTransport::new();
        transport.push_json(200, &submission_json("a b", Status::Pending));
        let gateway = gateway(transport, SessionStore::in_memory());

        let submission = gateway.fetch_submission_status("a b").await.expect("fetch");

        assert_eq!(submission.id, "a b");
        assert_eq!(gateway.transport().requests()[0].url, "http://api.test/api/submissions/a%20b");
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let transport = RecordingTransport::new();
        transport.push_failure("connection refused");
        let gateway = gateway(transport, SessionStore::in_memory());

        let err = gateway.fetch_submission_status("s-1").await.expect_err("offline");

        assert_eq!(err, ApiError::Network("connection refused".to_string()));
    }

    #[tokio::test]
    async fn undecodable_success_body_is_network_error() {
        let transport = RecordingTransport::new();
        transport.push_json(200, "<html>");
        let gateway = gateway(transport, SessionStore::in_memory());

        let err = gateway.fetch_submission_status("s-1").await.expect_err("garbage");

        assert!(matches!(err, ApiError::Network(message) if message.starts_with("unexpected response body")));
    }

    #[tokio::test]
    async fn admin_calls_short_circuit_without_credential() {
        let gateway = gateway(RecordingTransport::new(), SessionStore::in_memory());
        let query = AdminQuery::new(&FilterState::default(), 20, 0);

        let listed = gateway.list_admin_submissions(&query).await.expect_err("listing");
        let analytics = gateway.fetch_analytics().await.expect_err("analytics");

        assert_eq!(listed, ApiError::Unauthenticated);
        assert_eq!(analytics, ApiError::Unauthenticated);
        assert_eq!(gateway.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn admin_calls_attach_bearer_token() {
        let transport = RecordingTransport::new();
        transport.push_json(200, r#"{"items":[],"total":0,"limit":20,"offset":40}"#);
        transport.push_json(
            200,
            r#"{"counts_by_rating":{},"counts_by_status":{},"submissions_per_day":[]}"#,
        );
        let gateway = gateway(transport, signed_in());
        let query = AdminQuery::new(&FilterState::default(), 20, 40);

        let page = gateway.list_admin_submissions(&query).await.expect("list");
        gateway.fetch_analytics().await.expect("analytics");

        assert_eq!(page.offset, 40);
        let sent = gateway.transport().requests();
        assert_eq!(sent[0].url, "http://api.test/api/admin/submissions?limit=20&offset=40");
        assert_eq!(sent[0].bearer.as_deref(), Some("tok"));
        assert_eq!(sent[1].url, "http://api.test/api/admin/analytics");
        assert_eq!(sent[1].bearer.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn admin_401_is_auth_and_leaves_session_alone() {
        let transport = RecordingTransport::new();
        transport.push_json(401, r#"{"detail":"Could not validate credentials"}"#);
        let session = signed_in();
        let gateway = gateway(transport, session.clone());

        let err = gateway.fetch_analytics().await.expect_err("401");

        assert_eq!(err, ApiError::Auth("Could not validate credentials".to_string()));
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn login_requires_both_fields_locally() {
        let gateway = gateway(RecordingTransport::new(), SessionStore::in_memory());

        let err = gateway.login("admin", " ").await.expect_err("blank password");

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(gateway.transport().call_count(), 0);
    }
}
