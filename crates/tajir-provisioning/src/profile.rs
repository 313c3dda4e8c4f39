//! Merchant profile and role types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tajir_commerce::ids::MerchantId;

/// Role carried on a profile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A store owner.
    #[default]
    Merchant,
    /// Platform administrator who can provision merchants.
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Merchant => "merchant",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merchant" => Ok(Role::Merchant),
            "super_admin" => Ok(Role::SuperAdmin),
            _ => Err(()),
        }
    }
}

/// A profile row paired with an identity-service account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantProfile {
    /// Identity id. Also the owning merchant id on store rows.
    pub id: MerchantId,
    /// Role for authorization checks.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl MerchantProfile {
    /// Create a new profile.
    pub fn new(
        id: MerchantId,
        role: Role,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id,
            role,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if this profile may provision merchants.
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("merchant".parse(), Ok(Role::Merchant));
        assert_eq!("super_admin".parse(), Ok(Role::SuperAdmin));
        assert_eq!("admin".parse::<Role>(), Err(()));
    }

    #[test]
    fn test_super_admin_check() {
        let p = MerchantProfile::new(
            MerchantId::new("m-1"),
            Role::Merchant,
            "علي",
            "07701234567",
            "ali@example.com",
        );
        assert!(!p.is_super_admin());
    }
}
