//! HTTP client for the catalog persistence service.

mod api_client;
mod error;


pub use api_client::{
    ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT, Download, ENV_API_URL, FALLBACK_CONTENT_TYPE,
};
pub use error::{ClientError, ClientResult};
