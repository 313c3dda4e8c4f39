//! Merchant provisioning: one logical unit of work spanning the
//! identity service and the relational store.
//!
//! Creation order is identity -> profile -> store. The steps cannot share
//! a database transaction, so a failure after the identity exists runs a
//! compensating delete — no orphaned, storeless account survives a
//! failed registration.

use crate::error::ProvisioningError;
use crate::profile::{MerchantProfile, Role};
use crate::saga::{Compensation, Saga};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use tajir_commerce::ids::MerchantId;
use tajir_commerce::orders::valid_phone;
use tajir_commerce::store::{validate_slug, Store, SubscriptionDuration, SubscriptionTier};

/// Minimum password length accepted by the identity service.
pub const PASSWORD_MIN_LEN: usize = 6;

/// A new identity-service account request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIdentity {
    pub email: String,
    pub password: String,
    pub display_name: String,
    /// Admin-created accounts skip email confirmation.
    pub confirmed: bool,
}

/// Identity-service operations used by provisioning.
pub trait IdentityService {
    /// Create an account and return its id.
    fn create_account(&self, identity: &NewIdentity) -> Result<MerchantId, ProvisioningError>;

    /// Delete an account. Used as saga compensation.
    fn delete_account(&self, id: &MerchantId) -> Result<(), ProvisioningError>;
}

/// Profile row persistence.
pub trait ProfileStore {
    /// Load a profile by identity id.
    fn profile(&self, id: &MerchantId) -> Result<Option<MerchantProfile>, ProvisioningError>;

    /// Insert or update a profile row.
    fn upsert(&self, profile: &MerchantProfile) -> Result<(), ProvisioningError>;
}

/// Store row insertion.
///
/// Implementations must translate a unique-constraint violation on the
/// slug into [`ProvisioningError::SlugTaken`].
pub trait StoreProvisioner {
    fn insert_store(&self, store: &Store) -> Result<(), ProvisioningError>;
}

/// Registration payload submitted by the admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionMerchantInput {
    pub store_name: String,
    pub slug: String,
    pub category: String,
    pub subscription: SubscriptionTier,
    /// Months purchased; only 3, 6 and 12 are sold.
    pub duration_months: u32,
    /// Plan start date (ISO date).
    pub start_date: NaiveDate,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

impl ProvisionMerchantInput {
    /// Structural validation. Returns the parsed duration.
    pub fn validate(&self) -> Result<SubscriptionDuration, ProvisioningError> {
        if self.store_name.trim().chars().count() < 2 {
            return Err(ProvisioningError::Validation(
                "store name must be at least 2 characters".to_string(),
            ));
        }
        validate_slug(&self.slug)?;
        if self.category.trim().is_empty() {
            return Err(ProvisioningError::Validation(
                "store category is required".to_string(),
            ));
        }
        let duration = SubscriptionDuration::from_months(self.duration_months).ok_or_else(|| {
            ProvisioningError::Validation("subscription duration must be 3, 6 or 12 months".to_string())
        })?;
        if self.owner_name.trim().chars().count() < 2 {
            return Err(ProvisioningError::Validation(
                "owner name must be at least 2 characters".to_string(),
            ));
        }
        if !valid_phone(self.phone.trim()) {
            return Err(ProvisioningError::Validation(
                "phone number must be 8 to 20 characters of digits, spaces and hyphens".to_string(),
            ));
        }
        if !valid_email(self.email.trim()) {
            return Err(ProvisioningError::Validation(
                "a valid email address is required".to_string(),
            ));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(ProvisioningError::Validation(format!(
                "password must be at least {PASSWORD_MIN_LEN} characters"
            )));
        }
        Ok(duration)
    }

    /// Compute the subscription window as Unix timestamps:
    /// start date and start date plus the purchased months.
    pub fn subscription_window(
        &self,
        duration: SubscriptionDuration,
    ) -> Result<(i64, i64), ProvisioningError> {
        let expires_date = self
            .start_date
            .checked_add_months(Months::new(duration.months()))
            .ok_or_else(|| {
                ProvisioningError::Validation("plan start date is out of range".to_string())
            })?;
        Ok((midnight_utc(self.start_date)?, midnight_utc(expires_date)?))
    }
}

fn midnight_utc(date: NaiveDate) -> Result<i64, ProvisioningError> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| ProvisioningError::Validation("invalid date".to_string()))
}

/// Minimal email shape check: one `@`, a dot somewhere after it.
fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Engine orchestrating the provisioning saga.
pub struct MerchantProvisioning<'a, I, P, S>
where
    I: IdentityService,
    P: ProfileStore,
    S: StoreProvisioner,
{
    identities: &'a I,
    profiles: &'a P,
    stores: &'a S,
}

impl<'a, I, P, S> MerchantProvisioning<'a, I, P, S>
where
    I: IdentityService,
    P: ProfileStore,
    S: StoreProvisioner,
{
    pub fn new(identities: &'a I, profiles: &'a P, stores: &'a S) -> Self {
        Self {
            identities,
            profiles,
            stores,
        }
    }

    /// Provision a merchant: identity, profile, then store.
    ///
    /// Only a super admin may call this; the check runs before any side
    /// effect. A failure in the profile or store step deletes the
    /// identity created in the first step and returns the original
    /// error.
    pub fn provision(
        &self,
        actor: &MerchantId,
        input: &ProvisionMerchantInput,
    ) -> Result<Store, ProvisioningError> {
        let caller = self
            .profiles
            .profile(actor)?
            .ok_or(ProvisioningError::NotAuthorized)?;
        if !caller.is_super_admin() {
            return Err(ProvisioningError::NotAuthorized);
        }

        let duration = input.validate()?;
        let (started, expires) = input.subscription_window(duration)?;

        let created: RefCell<Option<MerchantId>> = RefCell::new(None);
        let provisioned: RefCell<Option<Store>> = RefCell::new(None);

        Saga::new("provision_merchant")
            .step("create_identity", || {
                let identity = NewIdentity {
                    email: input.email.trim().to_string(),
                    password: input.password.clone(),
                    display_name: input.owner_name.trim().to_string(),
                    confirmed: true,
                };
                let id = self.identities.create_account(&identity)?;
                *created.borrow_mut() = Some(id.clone());
                Ok(Some(Compensation::new("delete_identity", move || {
                    self.identities.delete_account(&id)
                })))
            })
            .step("upsert_profile", || {
                let id = merchant_id(&created)?;
                let profile = MerchantProfile::new(
                    id,
                    Role::Merchant,
                    input.owner_name.trim(),
                    input.phone.trim(),
                    input.email.trim(),
                );
                self.profiles.upsert(&profile)?;
                Ok(None)
            })
            .step("insert_store", || {
                let id = merchant_id(&created)?;
                let mut store = Store::new(id, input.store_name.trim(), input.slug.clone());
                store.category = Some(input.category.trim().to_string());
                store.subscription = input.subscription;
                store.active = true;
                store.plan_started_at = Some(started);
                store.plan_expires_at = Some(expires);
                self.stores.insert_store(&store)?;
                *provisioned.borrow_mut() = Some(store);
                Ok(None)
            })
            .run()?;

        provisioned.into_inner().ok_or_else(|| {
            ProvisioningError::Dependency("store missing after provisioning".to_string())
        })
    }
}

/// Read the identity id produced by the first saga step.
fn merchant_id(created: &RefCell<Option<MerchantId>>) -> Result<MerchantId, ProvisioningError> {
    created.borrow().clone().ok_or_else(|| {
        ProvisioningError::Dependency("identity id missing mid-saga".to_string())
    })
}

/// Wire response for provisioning:
/// `{ success: true }` or `{ success: false, error }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProvisionResponse {
    /// Convert an engine result, leaking no internal failure detail.
    pub fn from_result(result: &Result<Store, ProvisioningError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                error: None,
            },
            Err(e) => Self {
                success: false,
                error: Some(e.public_message()),
            },
        }
    }
}
