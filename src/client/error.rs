use miette::Diagnostic;
use thiserror::Error;

/// Failure of one outbound call to the catalog API.
///
/// `operation` describes what was attempted, e.g. `delete project with id X`,
/// so every message is actionable on its own.
#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("failed to {operation}: request timed out")]
    #[diagnostic(
        code(catalog::client::timeout),
        help("Increase --timeout-secs or check the catalog API's health endpoint.")
    )]
    Timeout { operation: String },

    #[error("failed to {operation}: could not reach the catalog API")]
    #[diagnostic(
        code(catalog::client::connection_failed),
        help(
            "Is the API server running? Try: catalog-api\nOr set CATALOG_API_URL to point to the correct server."
        )
    )]
    ConnectionFailed {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to {operation} (HTTP {status})")]
    #[diagnostic(code(catalog::client::upstream))]
    Upstream { operation: String, status: u16 },

    #[error("failed to {operation}: invalid response: {message}")]
    #[diagnostic(
        code(catalog::client::invalid_response),
        help(
            "The server returned data in an unexpected format. This might indicate a version mismatch."
        )
    )]
    InvalidResponse { operation: String, message: String },

    #[error("Invalid API base URL '{url}': {message}")]
    #[diagnostic(
        code(catalog::client::invalid_url),
        help("Use an absolute http(s) URL such as http://localhost:3977/api/project")
    )]
    InvalidBaseUrl { url: String, message: String },

    #[error("Failed to build HTTP client: {source}")]
    #[diagnostic(code(catalog::client::build))]
    Build {
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Classify a transport error raised while sending a request.
    pub(crate) fn transport(operation: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout {
                operation: operation.to_string(),
            }
        } else {
            ClientError::ConnectionFailed {
                operation: operation.to_string(),
                source: e,
            }
        }
    }

    /// Classify an error raised while reading a response body.
    pub(crate) fn body(operation: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout {
                operation: operation.to_string(),
            }
        } else {
            ClientError::InvalidResponse {
                operation: operation.to_string(),
                message: e.to_string(),
            }
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
