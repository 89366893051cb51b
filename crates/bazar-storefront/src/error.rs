//! Storefront error types.

use bazar_cache::CacheError;
use bazar_commerce::CommerceError;
use bazar_data::FetchError;
use thiserror::Error;

/// Errors surfaced by storefront components.
///
/// Components have already shown a toast or inline message by the time one
/// of these is returned; callers only need it for control flow.
#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Download could not be handed off.
    #[error("Download failed: {0}")]
    Download(String),

    /// A display-only admin action requested without the admin flag.
    #[error("Only admin users can generate inventory reports")]
    AdminOnly,
}
