//! Asset storage error types.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum AssetError {
    #[error("Asset not found: '{name}'")]
    #[diagnostic(code(catalog::assets::not_found))]
    NotFound { name: String },

    #[error("Invalid asset name: '{name}'")]
    #[diagnostic(
        code(catalog::assets::invalid_name),
        help("Asset names are plain file names as returned by the upload endpoint")
    )]
    InvalidName { name: String },

    #[error("Asset storage error: {message}")]
    #[diagnostic(code(catalog::assets::io))]
    Io { message: String },
}

pub type AssetResult<T> = Result<T, AssetError>;
