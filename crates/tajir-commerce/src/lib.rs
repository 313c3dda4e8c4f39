//! Storefront domain core for Tajir.
//!
//! This crate holds the business rules that must hold regardless of what
//! the client submits:
//!
//! - **Delivery**: zone configuration in its three legacy shapes,
//!   normalized and resolved to a per-city fee
//! - **Catalog**: products, sections, variant options and the
//!   combination generator
//! - **Orders**: server-side pricing and validation, the persisted order
//!   record, and the status state machine
//! - **Store**: tenant root, one-time slug change, subscription plans
//!
//! Storage, identity and realtime delivery stay behind traits
//! ([`catalog::ProductCatalog`], [`orders::OrderRepository`],
//! [`store::StoreDirectory`], [`events::OrderEventSink`]); this crate
//! contains no I/O of its own.
//!
//! # Example
//!
//! ```rust,ignore
//! use tajir_commerce::prelude::*;
//!
//! let engine = OrderPlacement::new(&catalog, &orders, &stores, &events);
//! let response = PlacementResponse::from_result(&engine.place_order(&request));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod delivery;
pub mod events;
pub mod orders;
pub mod store;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Delivery
    pub use crate::delivery::{CityRate, Zone, ZoneConfig, CAPITAL, GOVERNORATES};

    // Catalog
    pub use crate::catalog::{
        combination_id, regenerate, OutOfStockPolicy, Product, ProductCatalog, Section,
        VariantCombination, VariantOption, VariantSelection,
    };

    // Orders
    pub use crate::orders::{
        CustomerInfo, Order, OrderItem, OrderPlacement, OrderRepository, OrderStatus,
        OrderTransitions, PlaceOrderItem, PlaceOrderRequest, PlacementResponse,
        StatusChangeRequest,
    };

    // Store
    pub use crate::store::{
        validate_slug, PlanFeatures, PlanLimits, Store, StoreDirectory, SubscriptionDuration,
        SubscriptionPlan, SubscriptionTier,
    };

    // Events
    pub use crate::events::{NullEventSink, OrderEventSink};
}
