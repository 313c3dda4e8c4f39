//! Merchant onboarding for Tajir.
//!
//! Provisioning a merchant spans two systems that cannot share a
//! transaction: the identity service and the relational store. This
//! crate models the operation as a compensable saga — create identity,
//! upsert profile, insert store — with a compensating identity delete
//! when a later step fails.
//!
//! Only a profile with the super-admin role may provision merchants.

pub mod error;
pub mod profile;
pub mod provision;
pub mod saga;

pub use error::ProvisioningError;
pub use profile::{MerchantProfile, Role};
pub use provision::{
    IdentityService, MerchantProvisioning, NewIdentity, ProfileStore, ProvisionMerchantInput,
    ProvisionResponse, StoreProvisioner,
};
pub use saga::{Compensation, Saga};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::ProvisioningError;
    pub use crate::profile::{MerchantProfile, Role};
    pub use crate::provision::{
        IdentityService, MerchantProvisioning, NewIdentity, ProfileStore,
        ProvisionMerchantInput, ProvisionResponse, StoreProvisioner,
    };
    pub use crate::saga::{Compensation, Saga};
}
