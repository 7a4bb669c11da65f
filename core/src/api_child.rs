//! Endpoint construction and the typed build/parse pair every operation returns.
//!
//! # Design
//! `ApiSession` knows the base URL and credentials and turns a URL, query
//! string and optional JSON body into an `HttpRequest`. Resource wrappers
//! implement [`ApiChild`], which adds endpoint-path construction relative to
//! the wrapper's base segment plus one helper per HTTP verb.
//!
//! Every operation returns an [`ApiCall<T>`]: the request to execute and the
//! decoder that turns the matching response into `T`. The caller executes
//! the round-trip itself, or hands the call a [`Transport`].

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{check_status, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::pagination::{decode_page, Page};
use crate::transport::Transport;

/// Decodes a successful response into the operation's result type.
pub type Decoder<T> = fn(&HttpResponse) -> Result<T, ApiError>;

/// Ordered query parameters. `None` values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish()
    }
}

/// A request ready to execute and the decoder for its response.
pub struct ApiCall<T> {
    pub request: HttpRequest,
    decode: Decoder<T>,
}

impl<T> ApiCall<T> {
    pub fn new(request: HttpRequest, decode: Decoder<T>) -> Self {
        Self { request, decode }
    }

    /// Check the status and decode the body.
    pub fn parse(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        (self.decode)(&response)
    }

    /// Execute through `transport` and parse the response.
    pub fn send<Tr: Transport + ?Sized>(&self, transport: &Tr) -> Result<T, ApiError> {
        let response = transport.execute(&self.request)?;
        self.parse(response)
    }

    pub fn into_request(self) -> HttpRequest {
        self.request
    }
}

impl<T> Clone for ApiCall<T> {
    fn clone(&self) -> Self {
        Self {
            request: self.request.clone(),
            decode: self.decode,
        }
    }
}

impl<T> fmt::Debug for ApiCall<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCall")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// Decode the body as JSON.
pub fn decode_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(error = %e, "response body does not match model");
        ApiError::DeserializationError(e.to_string())
    })
}

/// Ignore the body; the status check already passed.
pub fn decode_empty(_response: &HttpResponse) -> Result<(), ApiError> {
    Ok(())
}

#[derive(serde::Deserialize)]
struct CreatedId {
    id: String,
}

/// Decode `{"id": "..."}` as answered by creation endpoints.
pub fn decode_id(response: &HttpResponse) -> Result<String, ApiError> {
    decode_json::<CreatedId>(response).map(|created| created.id)
}

/// Serialize a request model.
pub fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Base URL, credentials and defaults shared by every resource wrapper.
#[derive(Debug, Clone)]
pub struct ApiSession {
    config: ClientConfig,
}

impl ApiSession {
    pub fn new(config: ClientConfig) -> Self {
        let config = ClientConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };
        Self { config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a path below the base URL.
    pub fn ep(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// Query carrying `orgId`, falling back to the configured default org.
    pub fn org_query(&self, org_id: Option<&str>) -> QueryParams {
        QueryParams::new().push_opt("orgId", org_id.or(self.config.org_id.as_deref()))
    }

    /// Explicit `max`, falling back to the configured page size.
    pub fn page_size(&self, max: Option<u32>) -> Option<u32> {
        max.or(self.config.page_size)
    }

    /// Build the `HttpRequest` for one API call.
    pub fn request(
        &self,
        method: HttpMethod,
        url: &str,
        query: &QueryParams,
        body: Option<String>,
    ) -> HttpRequest {
        let path = if query.is_empty() {
            url.to_string()
        } else {
            format!("{url}?{}", query.encode())
        };
        let mut headers = vec![
            (
                "authorization".to_string(),
                format!("Bearer {}", self.config.access_token),
            ),
            ("trackingid".to_string(), format!("WXC_{}", Uuid::new_v4())),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        tracing::debug!(%method, url = %path, "built request");
        HttpRequest {
            method,
            path,
            headers,
            body,
        }
    }

    pub fn call<T>(
        &self,
        method: HttpMethod,
        url: &str,
        query: &QueryParams,
        body: Option<String>,
        decode: Decoder<T>,
    ) -> ApiCall<T> {
        ApiCall::new(self.request(method, url, query, body), decode)
    }
}

/// Endpoint construction and HTTP verb helpers for resource wrappers.
pub trait ApiChild {
    fn session(&self) -> &ApiSession;

    /// Path segment(s) below the base URL this wrapper lives under.
    fn base(&self) -> String;

    /// Endpoint URL, optionally with a trailing path below `base()`.
    fn ep(&self, path: Option<&str>) -> String {
        let base = self.base();
        match path {
            Some(path) => self
                .session()
                .ep(&format!("{}/{}", base, path.trim_start_matches('/'))),
            None => self.session().ep(&base),
        }
    }

    fn get<T: DeserializeOwned>(&self, url: &str, query: QueryParams) -> ApiCall<T> {
        self.session()
            .call(HttpMethod::Get, url, &query, None, decode_json::<T>)
    }

    fn get_page<T: DeserializeOwned>(&self, url: &str, query: QueryParams) -> ApiCall<Page<T>> {
        self.session()
            .call(HttpMethod::Get, url, &query, None, decode_page::<T>)
    }

    fn put<B: Serialize + ?Sized>(
        &self,
        url: &str,
        query: QueryParams,
        body: &B,
    ) -> Result<ApiCall<()>, ApiError> {
        let body = to_json(body)?;
        Ok(self
            .session()
            .call(HttpMethod::Put, url, &query, Some(body), decode_empty))
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        query: QueryParams,
        body: &B,
    ) -> Result<ApiCall<T>, ApiError> {
        let body = to_json(body)?;
        Ok(self
            .session()
            .call(HttpMethod::Post, url, &query, Some(body), decode_json::<T>))
    }

    fn post_no_content<B: Serialize + ?Sized>(
        &self,
        url: &str,
        query: QueryParams,
        body: &B,
    ) -> Result<ApiCall<()>, ApiError> {
        let body = to_json(body)?;
        Ok(self
            .session()
            .call(HttpMethod::Post, url, &query, Some(body), decode_empty))
    }

    /// POST without a body, e.g. `.../actions/<name>/invoke`.
    fn invoke(&self, url: &str, query: QueryParams) -> ApiCall<()> {
        self.session()
            .call(HttpMethod::Post, url, &query, None, decode_empty)
    }

    fn delete(&self, url: &str, query: QueryParams) -> ApiCall<()> {
        self.session()
            .call(HttpMethod::Delete, url, &query, None, decode_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Child<'a> {
        session: &'a ApiSession,
    }

    impl ApiChild for Child<'_> {
        fn session(&self) -> &ApiSession {
            self.session
        }

        fn base(&self) -> String {
            "telephony/calls".to_string()
        }
    }

    fn session() -> ApiSession {
        ApiSession::new(ClientConfig::new("secret").with_base_url("http://localhost:3000/"))
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn session_trims_trailing_slash_of_any_config() {
        let config = ClientConfig {
            base_url: "http://localhost:3000//".to_string(),
            ..ClientConfig::new("secret")
        };
        assert_eq!(ApiSession::new(config).base_url(), "http://localhost:3000");
    }

    #[test]
    fn ep_joins_base_and_path() {
        let session = session();
        let child = Child { session: &session };
        assert_eq!(child.ep(None), "http://localhost:3000/telephony/calls");
        assert_eq!(
            child.ep(Some("/dial")),
            "http://localhost:3000/telephony/calls/dial"
        );
    }

    #[test]
    fn request_carries_auth_and_tracking_headers() {
        let session = session();
        let req = session.request(
            HttpMethod::Get,
            "http://localhost:3000/people",
            &QueryParams::new(),
            None,
        );
        assert_eq!(req.header("authorization"), Some("Bearer secret"));
        assert!(req.header("trackingid").unwrap().starts_with("WXC_"));
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn body_adds_content_type() {
        let session = session();
        let child = Child { session: &session };
        let call = child
            .post_no_content(&child.ep(Some("hold")), QueryParams::new(), &serde_json::json!({"callId": "c1"}))
            .unwrap();
        assert_eq!(call.request.method, HttpMethod::Post);
        assert_eq!(call.request.header("content-type"), Some("application/json"));
        assert_eq!(call.request.body.as_deref(), Some(r#"{"callId":"c1"}"#));
    }

    #[test]
    fn query_is_encoded_in_order() {
        let query = QueryParams::new()
            .push("displayName", "Jane Doe")
            .push_opt("max", Some(10))
            .push_opt::<String>("email", None)
            .push("id", "a,b");
        let session = session();
        let req = session.request(HttpMethod::Get, "http://localhost:3000/people", &query, None);
        assert_eq!(
            req.path,
            "http://localhost:3000/people?displayName=Jane+Doe&max=10&id=a%2Cb"
        );
    }

    #[test]
    fn org_query_falls_back_to_default() {
        let session = ApiSession::new(ClientConfig::new("t").with_org_id("org-default"));
        assert_eq!(
            session.org_query(None).pairs(),
            &[("orgId".to_string(), "org-default".to_string())]
        );
        assert_eq!(
            session.org_query(Some("org-x")).pairs(),
            &[("orgId".to_string(), "org-x".to_string())]
        );
        let bare = ApiSession::new(ClientConfig::new("t"));
        assert!(bare.org_query(None).is_empty());
    }

    #[test]
    fn unit_call_ignores_body() {
        let session = session();
        let child = Child { session: &session };
        let call = child.delete(&child.ep(Some("x")), QueryParams::new());
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(call.parse(response).is_ok());
    }

    #[test]
    fn json_call_rejects_bad_body() {
        let session = session();
        let child = Child { session: &session };
        let call: ApiCall<Vec<String>> = child.get(&child.ep(None), QueryParams::new());
        let err = call.parse(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn status_is_checked_before_decoding() {
        let session = session();
        let child = Child { session: &session };
        let call: ApiCall<Vec<String>> = child.get(&child.ep(None), QueryParams::new());
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        assert!(matches!(call.parse(response).unwrap_err(), ApiError::NotFound));
    }

    #[test]
    fn decode_id_reads_created_id() {
        assert_eq!(decode_id(&ok(r#"{"id":"new-id"}"#)).unwrap(), "new-id");
    }
}
