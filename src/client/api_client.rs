use std::env;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::{ClientError, ClientResult};

/// Environment variable consulted when no explicit URL is given.
pub const ENV_API_URL: &str = "CATALOG_API_URL";

/// Base URL of a locally running catalog API.
pub const DEFAULT_API_URL: &str = "http://localhost:3977/api/project";

/// Per-request timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Content type assumed when the server does not send one.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Raw payload fetched from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// API client for the catalog persistence service
///
/// Every call issues exactly one request and awaits the full response.
/// Nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. CATALOG_API_URL environment variable
    /// 3. Default: http://localhost:3977/api/project
    pub fn new(api_url: Option<String>, timeout: Duration) -> ClientResult<Self> {
        let raw = api_url
            .or_else(|| env::var(ENV_API_URL).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let base_url = Url::parse(&raw).map_err(|e| ClientError::InvalidBaseUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: raw,
                message: "URL cannot carry a path".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Build { source })?;

        Ok(Self { base_url, client })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        Ok(self.client.request(method, self.url(segments)?))
    }

    /// Send the request and reject any non-success status.
    async fn send(&self, operation: &str, request: RequestBuilder) -> ClientResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(operation, e))?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "API responded");
        if !status.is_success() {
            return Err(ClientError::Upstream {
                operation: operation.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn send_json(&self, operation: &str, request: RequestBuilder) -> ClientResult<Value> {
        self.send(operation, request)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::body(operation, e))
    }

    /// GET a JSON document.
    pub async fn get_json(&self, operation: &str, segments: &[&str]) -> ClientResult<Value> {
        let request = self.request(Method::GET, segments)?;
        self.send_json(operation, request).await
    }

    /// POST a JSON body and return the JSON response.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<Value> {
        let request = self.request(Method::POST, segments)?.json(body);
        self.send_json(operation, request).await
    }

    /// PUT a JSON body and return the JSON response.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        operation: &str,
        segments: &[&str],
        body: &B,
    ) -> ClientResult<Value> {
        let request = self.request(Method::PUT, segments)?.json(body);
        self.send_json(operation, request).await
    }

    /// PUT a multipart form and return the JSON response.
    pub async fn put_multipart(
        &self,
        operation: &str,
        segments: &[&str],
        form: Form,
    ) -> ClientResult<Value> {
        let request = self.request(Method::PUT, segments)?.multipart(form);
        self.send_json(operation, request).await
    }

    /// DELETE a resource and return the JSON response.
    pub async fn delete_json(&self, operation: &str, segments: &[&str]) -> ClientResult<Value> {
        let request = self.request(Method::DELETE, segments)?;
        self.send_json(operation, request).await
    }

    /// GET raw bytes together with their content type.
    pub async fn get_bytes(&self, operation: &str, segments: &[&str]) -> ClientResult<Download> {
        let request = self.request(Method::GET, segments)?;
        let response = self.send(operation, request).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::body(operation, e))?;

        Ok(Download {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
