//! Site error types

use ruhora_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or validating the site
#[derive(Error, Debug)]
pub enum SiteError {
    /// A referenced image does not exist under the public directory
    #[error("Missing asset: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Unknown journal entry: {0}")]
    UnknownJournalEntry(u32),

    /// An outbound link could not be built
    #[error("Invalid link: {0}")]
    InvalidLink(#[from] url::ParseError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;
