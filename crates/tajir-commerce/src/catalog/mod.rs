//! Catalog: products, sections, and variant combinations.

mod product;
mod section;
mod variants;

pub use product::{OutOfStockPolicy, Product, MOCK_STOCK_AVAILABLE};
pub use section::Section;
pub use variants::{
    combination_id, regenerate, VariantCombination, VariantOption, VariantSelection,
    COMBINATION_DELIMITER,
};

use crate::error::CommerceError;
use crate::ids::{ProductId, StoreId};

/// Read access to a store's product catalog.
///
/// Backed by the relational store in production; in-memory fakes in tests.
pub trait ProductCatalog {
    /// Fetch the products of a store matching the given id set.
    ///
    /// Ids with no matching row are simply absent from the result; the
    /// caller decides whether that is fatal.
    fn products_by_ids(
        &self,
        store: &StoreId,
        ids: &[ProductId],
    ) -> Result<Vec<Product>, CommerceError>;
}
