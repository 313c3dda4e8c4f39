//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Malformed or out-of-range input; always user-correctable.
    #[error("validation error: {0}")]
    Validation(String),

    /// Caller lacks the required role or does not own the resource.
    /// Deliberately carries no detail about whether the resource exists.
    #[error("not authorized")]
    NotAuthorized,

    /// Store not found.
    #[error("store not found: {0}")]
    StoreNotFound(String),

    /// Order not found.
    #[error("order not found: {0}")]
    OrderNotFound(String),

    /// A requested product is missing from the store's catalog or
    /// not available for purchase.
    #[error("product unavailable: {0}")]
    ProductUnavailable(String),

    /// The requested city is not covered by the store's delivery zones.
    #[error("delivery is not available for {0}")]
    NotServiced(String),

    /// Another store already owns this slug.
    #[error("slug already taken: {0}")]
    SlugTaken(String),

    /// The store has already used its one allowed slug change.
    #[error("store slug can only be changed once")]
    SlugAlreadyChanged,

    /// The requested order status is not a recognized value.
    #[error("unknown order status: {0}")]
    InvalidStatus(String),

    /// Arithmetic overflow in a price calculation.
    #[error("arithmetic overflow in price calculation")]
    Overflow,

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The data store or another dependency failed. Full detail is
    /// logged server-side; callers see a generic message.
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl CommerceError {
    /// Check if this error was caused by bad caller input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CommerceError::Validation(_)
                | CommerceError::ProductUnavailable(_)
                | CommerceError::NotServiced(_)
                | CommerceError::InvalidStatus(_)
                | CommerceError::SlugTaken(_)
                | CommerceError::SlugAlreadyChanged
        )
    }

    /// Check if this is a unique-constraint style conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            CommerceError::SlugTaken(_) | CommerceError::SlugAlreadyChanged
        )
    }

    /// Message safe to surface to untrusted callers.
    ///
    /// User-correctable errors pass through verbatim; internal failures
    /// collapse to a generic message so no detail leaks.
    pub fn public_message(&self) -> String {
        match self {
            CommerceError::Dependency(_)
            | CommerceError::Serialization(_)
            | CommerceError::Overflow => "something went wrong, please try again".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
