// ============================================================================
// API CLIENT - bearer token + JSON body handling over an HttpTransport
// ============================================================================
// Single attempt per call: no retries, no timeout. Callers that need to
// give up early use `request_cancellable`.
// ============================================================================

use futures::future::{AbortRegistration, Abortable};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::services::transport::{FetchTransport, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::stores::session_store::SessionStore;
use crate::utils::storage::{BrowserStorage, KeyValueStorage};

/// What came back, before it is turned into `Ok`/`Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Success { body: Value },
    HttpError { status: u16, message: String },
    /// 2xx whose body is not JSON
    MalformedBody { status: u16, raw: String },
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        !matches!(self, ApiResponse::HttpError { .. })
    }

    /// A malformed success body is wrapped as `{ "message": raw }`, never an error.
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self {
            ApiResponse::Success { body } => Ok(body),
            ApiResponse::MalformedBody { raw, .. } => Ok(json!({ "message": raw })),
            ApiResponse::HttpError { status, message } => Err(ApiError::Http { status, message }),
        }
    }
}

/// Classify a status + body pair.
pub fn classify_response(status: u16, text: &str) -> ApiResponse {
    let ok = (200..300).contains(&status);
    let parsed: Option<Value> = if text.is_empty() {
        Some(json!({}))
    } else {
        serde_json::from_str(text).ok()
    };

    if ok {
        return match parsed {
            Some(body) => ApiResponse::Success { body },
            None => ApiResponse::MalformedBody {
                status,
                raw: text.to_string(),
            },
        };
    }

    let message = match &parsed {
        Some(body) => error_message(body),
        None => Some(text.to_string()),
    }
    .unwrap_or_else(|| format!("HTTP {}", status));

    ApiResponse::HttpError { status, message }
}

/// `message`, then `error` (plain value or `{ message }`).
fn error_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(message_text)
        .or_else(|| body.get("error").and_then(message_text))
        .or_else(|| {
            body.get("error")
                .and_then(|e| e.get("message"))
                .and_then(message_text)
        })
}

/// Scalars that would read as a message; empty, zero, false and null don't.
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// HTTP client bound to a base address and a session store.
#[derive(Clone)]
pub struct ApiClient<T: HttpTransport, B: KeyValueStorage> {
    base_url: String,
    transport: T,
    session: SessionStore<B>,
}

impl ApiClient<FetchTransport, BrowserStorage> {
    /// Browser client: `fetch` + localStorage, base from `CONFIG.api_base`.
    pub fn new() -> Self {
        Self::with_parts(CONFIG.api_base.clone(), FetchTransport, SessionStore::local())
    }
}

impl Default for ApiClient<FetchTransport, BrowserStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HttpTransport, B: KeyValueStorage> ApiClient<T, B> {
    pub fn with_parts(base_url: impl Into<String>, transport: T, session: SessionStore<B>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore<B> {
        &self.session
    }

    /// Plain concatenation, the path is expected to start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fails with `Unauthenticated` before anything goes on the wire.
    pub fn build_request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];

        if requires_auth {
            let token = self.session.token().ok_or(ApiError::Unauthenticated)?;
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        Ok(HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
        })
    }

    /// Send and classify without collapsing into `Result<Value>`.
    pub async fn send(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.build_request(path, method, body, requires_auth)?;
        log::debug!("🌐 [API] {} {}", method.as_str(), request.url);

        let HttpResponse { status, body } = self.transport.send(request).await?;
        let response = classify_response(status, &body);

        match &response {
            ApiResponse::HttpError { status, message } => {
                log::warn!("⚠️ [API] {} {} -> {}: {}", method.as_str(), path, status, message);
            }
            ApiResponse::MalformedBody { status, .. } => {
                log::warn!("⚠️ [API] {} {} -> {} with a non-JSON body", method.as_str(), path, status);
            }
            ApiResponse::Success { .. } => {}
        }

        Ok(response)
    }

    pub async fn request(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> Result<Value, ApiError> {
        self.send(path, method, body, requires_auth).await?.into_result()
    }

    /// `request` that resolves to `ApiError::Cancelled` once the paired
    /// `AbortHandle` fires (e.g. the page is being left).
    pub async fn request_cancellable(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<&Value>,
        requires_auth: bool,
        registration: AbortRegistration,
    ) -> Result<Value, ApiError> {
        Abortable::new(self.request(path, method, body, requires_auth), registration)
            .await
            .map_err(|_| {
                log::info!("🛑 [API] {} {} cancelled", method.as_str(), path);
                ApiError::Cancelled
            })?
    }

    pub async fn request_json<R: DeserializeOwned>(
        &self,
        path: &str,
        method: HttpMethod,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> Result<R, ApiError> {
        let value = self.request(path, method, body, requires_auth).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Serialization(e.to_string()))
    }

    pub async fn get(&self, path: &str, requires_auth: bool) -> Result<Value, ApiError> {
        self.request(path, HttpMethod::Get, None, requires_auth).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use futures::executor::block_on;
    use futures::future::AbortHandle;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeTransport {
        sent: Rc<RefCell<Vec<HttpRequest>>>,
        replies: Rc<RefCell<VecDeque<Result<HttpResponse, ApiError>>>>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Self {
            let fake = Self::default();
            fake.replies.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
            fake
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.sent.borrow().clone()
        }
    }

    impl HttpTransport for FakeTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.borrow_mut().push(request);
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("no canned reply".into())))
        }
    }

    fn client(transport: FakeTransport) -> ApiClient<FakeTransport, MemoryStorage> {
        ApiClient::with_parts(
            "http://localhost:3001/api",
            transport,
            SessionStore::new(MemoryStorage::new()),
        )
    }

    #[test]
    fn auth_required_without_token_never_hits_the_network() {
        let transport = FakeTransport::replying(200, "{}");
        let api = client(transport.clone());

        let result = block_on(api.request("/rescues/mine", HttpMethod::Get, None, true));

        assert_eq!(result, Err(ApiError::Unauthenticated));
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn sends_bearer_token_json_header_and_body() {
        let transport = FakeTransport::replying(201, r#"{"id": 9}"#);
        let api = client(transport.clone());
        api.session().set_token("tok-123").unwrap();

        let body = json!({"title": "Injured pup", "latitude": 12.9});
        let result = block_on(api.request("/rescues", HttpMethod::Post, Some(&body), true)).unwrap();
        assert_eq!(result, json!({"id": 9}));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].url, "http://localhost:3001/api/rescues");
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
        assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-123"));
        let sent_body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(sent_body, body);
    }

    #[test]
    fn anonymous_request_has_no_authorization_header() {
        let transport = FakeTransport::replying(200, "[]");
        let api = client(transport.clone());
        api.session().set_token("ignored").unwrap();

        block_on(api.get("/donations", false)).unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].header("Authorization"), None);
        assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
        assert_eq!(sent[0].body, None);
    }

    #[test]
    fn not_found_uses_message_field() {
        let api = client(FakeTransport::replying(404, r#"{"message":"Not found"}"#));
        let err = block_on(api.get("/rescues/42", false)).unwrap_err();
        assert_eq!(err, ApiError::Http { status: 404, message: "Not found".into() });
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn empty_success_body_is_an_empty_object() {
        let api = client(FakeTransport::replying(200, ""));
        assert_eq!(block_on(api.get("/ping", false)).unwrap(), json!({}));
    }

    #[test]
    fn non_json_error_body_becomes_the_message() {
        let api = client(FakeTransport::replying(500, "oops"));
        let err = block_on(api.get("/boom", false)).unwrap_err();
        assert_eq!(err.to_string(), "oops");
    }

    #[test]
    fn non_json_success_body_is_wrapped_not_thrown() {
        let api = client(FakeTransport::replying(200, "OK"));
        assert_eq!(block_on(api.get("/health", false)).unwrap(), json!({"message": "OK"}));
    }

    #[test]
    fn transport_failure_propagates() {
        let api = client(FakeTransport::default());
        assert!(matches!(block_on(api.get("/x", false)), Err(ApiError::Network(_))));
    }

    #[test]
    fn classify_covers_every_branch() {
        assert_eq!(
            classify_response(400, r#"{"error":"Email taken"}"#),
            ApiResponse::HttpError { status: 400, message: "Email taken".into() }
        );
        assert_eq!(
            classify_response(422, r#"{"error":{"message":"Bad latitude"}}"#),
            ApiResponse::HttpError { status: 422, message: "Bad latitude".into() }
        );
        assert_eq!(
            classify_response(503, ""),
            ApiResponse::HttpError { status: 503, message: "HTTP 503".into() }
        );
        assert_eq!(
            classify_response(401, r#"{"message":""}"#),
            ApiResponse::HttpError { status: 401, message: "HTTP 401".into() }
        );
        assert_eq!(
            classify_response(204, ""),
            ApiResponse::Success { body: json!({}) }
        );
        assert_eq!(
            classify_response(200, "<html>"),
            ApiResponse::MalformedBody { status: 200, raw: "<html>".into() }
        );
        assert!(!classify_response(418, "{}").is_success());
    }

    #[test]
    fn typed_request_deserializes_body() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Login {
            token: String,
        }
        let api = client(FakeTransport::replying(200, r#"{"token":"abc","user":{}}"#));
        let login: Login = block_on(api.request_json(
            "/auth/login",
            HttpMethod::Post,
            Some(&json!({"email": "a@b.c", "password": "pw"})),
            false,
        ))
        .unwrap();
        assert_eq!(login, Login { token: "abc".into() });
    }

    #[test]
    fn aborted_request_reports_cancelled() {
        let api = client(FakeTransport::replying(200, "{}"));
        let (handle, registration) = AbortHandle::new_pair();
        handle.abort();

        let result = block_on(api.request_cancellable("/rescues", HttpMethod::Get, None, false, registration));
        assert_eq!(result, Err(ApiError::Cancelled));
    }

    #[test]
    fn scalar_error_fields_are_shown_as_text() {
        assert_eq!(
            classify_response(404, r#"{"message":404}"#),
            ApiResponse::HttpError { status: 404, message: "404".into() }
        );
        assert_eq!(
            classify_response(409, r#"{"message":0,"error":12.5}"#),
            ApiResponse::HttpError { status: 409, message: "12.5".into() }
        );
        assert_eq!(
            classify_response(500, r#"{"message":null,"error":false}"#),
            ApiResponse::HttpError { status: 500, message: "HTTP 500".into() }
        );
    }
}
