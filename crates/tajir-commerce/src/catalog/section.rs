//! Catalog section (category) types.

use crate::ids::{SectionId, StoreId};
use serde::{Deserialize, Serialize};

/// A category grouping products within one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: SectionId,
    /// Owning store.
    pub store_id: StoreId,
    /// Display name.
    pub name: String,
    /// Sort order position.
    pub position: i32,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Section {
    /// Create a new section.
    pub fn new(store_id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id: SectionId::generate(),
            store_id,
            name: name.into(),
            position: 0,
            created_at: current_timestamp(),
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
