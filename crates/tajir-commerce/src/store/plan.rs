//! Subscription plan types.

use crate::ids::PlanId;
use serde::{Deserialize, Serialize};

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Premium => "premium",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(SubscriptionTier::Free),
            "pro" => Some(SubscriptionTier::Pro),
            "premium" => Some(SubscriptionTier::Premium),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Pro => "Pro",
            SubscriptionTier::Premium => "Premium",
        }
    }
}

/// Subscription duration in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionDuration {
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl SubscriptionDuration {
    /// Number of months this duration covers.
    pub fn months(&self) -> u32 {
        match self {
            SubscriptionDuration::ThreeMonths => 3,
            SubscriptionDuration::SixMonths => 6,
            SubscriptionDuration::TwelveMonths => 12,
        }
    }

    /// Parse from a month count. Only 3, 6 and 12 are sold.
    pub fn from_months(months: u32) -> Option<Self> {
        match months {
            3 => Some(SubscriptionDuration::ThreeMonths),
            6 => Some(SubscriptionDuration::SixMonths),
            12 => Some(SubscriptionDuration::TwelveMonths),
            _ => None,
        }
    }
}

/// Unlimited marker for plan caps.
pub const UNLIMITED: i64 = -1;

/// Numeric caps for a plan. `-1` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub max_products: i64,
    pub max_sections: i64,
    pub max_monthly_orders: i64,
    pub max_delivery_zones: i64,
}

impl PlanLimits {
    /// Check whether a cap allows one more item given the current count.
    pub fn allows(cap: i64, current: i64) -> bool {
        cap == UNLIMITED || current < cap
    }

    pub fn can_add_product(&self, current: i64) -> bool {
        Self::allows(self.max_products, current)
    }

    pub fn can_add_section(&self, current: i64) -> bool {
        Self::allows(self.max_sections, current)
    }

    pub fn can_add_zone(&self, current: i64) -> bool {
        Self::allows(self.max_delivery_zones, current)
    }

    pub fn within_monthly_orders(&self, current: i64) -> bool {
        Self::allows(self.max_monthly_orders, current)
    }
}

/// Feature flags for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlanFeatures {
    pub custom_theme: bool,
    pub remove_branding: bool,
    pub advanced_reports: bool,
    pub free_delivery_all_zones: bool,
    pub custom_slug: bool,
}

/// A subscription plan referenced by stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub tier: SubscriptionTier,
    pub name: String,
    pub limits: PlanLimits,
    pub features: PlanFeatures,
}

impl SubscriptionPlan {
    /// Built-in plan preset for a tier.
    pub fn preset(tier: SubscriptionTier) -> Self {
        let (limits, features) = match tier {
            SubscriptionTier::Free => (
                PlanLimits {
                    max_products: 20,
                    max_sections: 5,
                    max_monthly_orders: 50,
                    max_delivery_zones: 3,
                },
                PlanFeatures::default(),
            ),
            SubscriptionTier::Pro => (
                PlanLimits {
                    max_products: 200,
                    max_sections: 30,
                    max_monthly_orders: 1000,
                    max_delivery_zones: UNLIMITED,
                },
                PlanFeatures {
                    custom_theme: true,
                    custom_slug: true,
                    ..PlanFeatures::default()
                },
            ),
            SubscriptionTier::Premium => (
                PlanLimits {
                    max_products: UNLIMITED,
                    max_sections: UNLIMITED,
                    max_monthly_orders: UNLIMITED,
                    max_delivery_zones: UNLIMITED,
                },
                PlanFeatures {
                    custom_theme: true,
                    remove_branding: true,
                    advanced_reports: true,
                    free_delivery_all_zones: true,
                    custom_slug: true,
                },
            ),
        };
        Self {
            id: PlanId::new(tier.as_str()),
            tier,
            name: tier.display_name().to_string(),
            limits,
            features,
        }
    }
}
