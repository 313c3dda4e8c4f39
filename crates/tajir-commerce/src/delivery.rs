//! Delivery-zone configuration and fee resolution.
//!
//! Zone configuration has gone through three storage shapes over the
//! life of the product. All three are decoded at the boundary into one
//! tagged union, then normalized into a `city -> fee` table before any
//! lookup. A city absent from the table is *not serviced* — resolution
//! never falls back to a zero fee.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The capital, which gets its own rate in the legacy two-tier shape.
pub const CAPITAL: &str = "بغداد";

/// Fixed reference list of governorates used by the legacy two-tier shape.
pub const GOVERNORATES: &[&str] = &[
    "بغداد",
    "البصرة",
    "نينوى",
    "أربيل",
    "النجف",
    "كربلاء",
    "كركوك",
    "الأنبار",
    "بابل",
    "ديالى",
    "ذي قار",
    "السليمانية",
    "صلاح الدين",
    "القادسية",
    "واسط",
    "ميسان",
    "المثنى",
    "دهوك",
];

/// Default capital fee when no configuration exists (minor units).
pub const DEFAULT_CAPITAL_FEE: i64 = 5000;
/// Default provinces fee when no configuration exists (minor units).
pub const DEFAULT_PROVINCES_FEE: i64 = 8000;

/// A named delivery-fee bucket covering one or more cities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Display name of the zone.
    #[serde(default)]
    pub name: String,
    /// Disabled zones do not service their cities.
    pub enabled: bool,
    /// Delivery fee in minor units.
    pub fee: i64,
    /// Cities covered by this zone.
    pub cities: Vec<String>,
}

/// Per-city rate used by the flat shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRate {
    pub enabled: bool,
    pub fee: i64,
}

/// Normalized delivery-zone configuration.
///
/// Decoded from one of three legacy shapes via [`ZoneConfig::from_json`];
/// persisted going forward in this tagged form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneConfig {
    /// Zoned array shape: named zones, each with a fee and city list.
    Zoned { zones: Vec<Zone> },
    /// Flat per-city shape: city name keyed directly to a rate.
    PerCity { cities: BTreeMap<String, CityRate> },
    /// Legacy two-tier shape: one fee for the capital, one for provinces,
    /// applied across the fixed governorate list.
    Legacy { baghdad: i64, provinces: i64 },
}

impl Default for ZoneConfig {
    fn default() -> Self {
        ZoneConfig::Legacy {
            baghdad: DEFAULT_CAPITAL_FEE,
            provinces: DEFAULT_PROVINCES_FEE,
        }
    }
}

impl ZoneConfig {
    /// Decode a raw configuration blob in any of the three legacy shapes.
    ///
    /// Detection heuristics, in order:
    /// 1. An object with a `zones` array is the zoned shape.
    /// 2. An object with no `baghdad` key and more than two keys is the
    ///    flat per-city shape.
    /// 3. Anything else (including null or a missing blob) is the legacy
    ///    two-tier shape, defaulting to 5000/8000.
    pub fn from_json(raw: &serde_json::Value) -> ZoneConfig {
        let obj = match raw.as_object() {
            Some(obj) => obj,
            None => return ZoneConfig::default(),
        };

        if let Some(zones) = obj.get("zones").and_then(|v| v.as_array()) {
            let zones = zones
                .iter()
                .filter_map(|z| z.as_object())
                .map(|z| Zone {
                    name: z
                        .get("name")
                        .and_then(|v| v.as_str())
                        .unwrap_or("")
                        .to_string(),
                    enabled: z.get("enabled").and_then(|v| v.as_bool()).unwrap_or(false),
                    fee: json_fee(z.get("fee")),
                    cities: z
                        .get("cities")
                        .and_then(|v| v.as_array())
                        .map(|cities| {
                            cities
                                .iter()
                                .filter_map(|c| c.as_str())
                                .map(|c| c.trim().to_string())
                                .collect()
                        })
                        .unwrap_or_default(),
                })
                .collect();
            return ZoneConfig::Zoned { zones };
        }

        if !obj.contains_key("baghdad") && obj.len() > 2 {
            let cities = obj
                .iter()
                .filter_map(|(city, v)| {
                    let rate = v.as_object()?;
                    Some((
                        city.trim().to_string(),
                        CityRate {
                            enabled: rate
                                .get("enabled")
                                .and_then(|v| v.as_bool())
                                .unwrap_or(false),
                            fee: json_fee(rate.get("fee")),
                        },
                    ))
                })
                .collect();
            return ZoneConfig::PerCity { cities };
        }

        ZoneConfig::Legacy {
            baghdad: obj
                .get("baghdad")
                .and_then(|v| v.as_i64())
                .unwrap_or(DEFAULT_CAPITAL_FEE),
            provinces: obj
                .get("provinces")
                .and_then(|v| v.as_i64())
                .unwrap_or(DEFAULT_PROVINCES_FEE),
        }
    }

    /// Normalize into a `city -> fee` table. Disabled zones and disabled
    /// per-city entries are absent, which reads as "not serviced".
    pub fn rate_table(&self) -> BTreeMap<String, i64> {
        match self {
            ZoneConfig::Zoned { zones } => zones
                .iter()
                .filter(|z| z.enabled)
                .flat_map(|z| z.cities.iter().map(|c| (c.trim().to_string(), z.fee)))
                .collect(),
            ZoneConfig::PerCity { cities } => cities
                .iter()
                .filter(|(_, rate)| rate.enabled)
                .map(|(city, rate)| (city.trim().to_string(), rate.fee))
                .collect(),
            ZoneConfig::Legacy { baghdad, provinces } => GOVERNORATES
                .iter()
                .map(|city| {
                    let fee = if *city == CAPITAL { *baghdad } else { *provinces };
                    (city.to_string(), fee)
                })
                .collect(),
        }
    }

    /// Resolve the delivery fee for a city.
    ///
    /// A city with no entry in the normalized table is rejected as not
    /// serviced; there is no silent zero-fee fallback.
    pub fn resolve_fee(&self, city: &str, currency: Currency) -> Result<Money, CommerceError> {
        let city = city.trim();
        self.rate_table()
            .get(city)
            .map(|fee| Money::new(*fee, currency))
            .ok_or_else(|| CommerceError::NotServiced(city.to_string()))
    }
}

/// Read a fee that may be stored as an integer or a float.
fn json_fee(v: Option<&serde_json::Value>) -> i64 {
    match v {
        Some(v) => v
            .as_i64()
            .or_else(|| v.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        None => 0,
    }
}
