//! Variant options and the combination generator.
//!
//! A product's variant axes (e.g., "Color") each carry an ordered set of
//! values. Selectable variants are the Cartesian product of those value
//! sets. Combinations are never persisted independently: they are
//! regenerated whenever options change, carrying forward any price
//! overrides whose canonical combination id survived the edit.

use crate::ids::OptionId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Delimiter between `optionId:value` pairs in a combination id.
pub const COMBINATION_DELIMITER: &str = "|";

/// A named variant axis with its selectable values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    /// Unique option identifier.
    pub id: OptionId,
    /// Axis name (e.g., "Size", "Color").
    pub name: String,
    /// Ordered distinct values (e.g., "S", "M", "L").
    pub values: Vec<String>,
}

impl VariantOption {
    /// Create a new option.
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            id: OptionId::generate(),
            name: name.into(),
            values,
        }
    }

    /// An option participates in generation only with a non-empty name
    /// and at least one non-empty value.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.values.iter().any(|v| !v.trim().is_empty())
    }

    fn valid_values(&self) -> impl Iterator<Item = &str> {
        self.values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// One selected value on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSelection {
    /// The option this value belongs to.
    pub option_id: OptionId,
    /// Axis name, denormalized for display.
    pub option_name: String,
    /// Selected value.
    pub value: String,
}

/// One point in the Cartesian product of a product's variant options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantCombination {
    /// Canonical id built from sorted `optionId:value` pairs.
    pub id: String,
    /// Selections in option order.
    pub selections: Vec<VariantSelection>,
    /// Price override. Empty means "use the product base price".
    pub price_override: Option<Money>,
}

impl VariantCombination {
    /// Effective price given the product base price.
    pub fn price(&self, base: Money) -> Money {
        self.price_override.unwrap_or(base)
    }

    /// Human-readable label, e.g. "Large / Blue".
    pub fn label(&self) -> String {
        self.selections
            .iter()
            .map(|s| s.value.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Build the canonical combination id from `(option id, value)` pairs.
///
/// Pairs are sorted by option id so the id does not depend on the order
/// the options happen to be listed in.
pub fn combination_id(pairs: &[(&OptionId, &str)]) -> String {
    let mut sorted: Vec<_> = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    sorted
        .iter()
        .map(|(id, value)| format!("{}:{}", id, value))
        .collect::<Vec<_>>()
        .join(COMBINATION_DELIMITER)
}

/// Regenerate the combination list for a set of options.
///
/// Options without a usable name or any value are skipped. The result is
/// the Cartesian product over the remaining options' values, in option
/// order. A combination whose canonical id already existed in `previous`
/// keeps its price override; everything else starts with no override.
/// With zero valid options the result is empty — no forced single
/// combination. Regeneration is idempotent.
pub fn regenerate(
    options: &[VariantOption],
    previous: &[VariantCombination],
) -> Vec<VariantCombination> {
    let valid: Vec<&VariantOption> = options.iter().filter(|o| o.is_valid()).collect();
    if valid.is_empty() {
        return Vec::new();
    }

    let prior: HashMap<&str, &VariantCombination> =
        previous.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut combinations = Vec::new();
    let mut current: Vec<VariantSelection> = Vec::with_capacity(valid.len());
    expand(&valid, 0, &mut current, &mut combinations, &prior);
    combinations
}

/// Recursive Cartesian expansion over the valid options.
fn expand(
    options: &[&VariantOption],
    depth: usize,
    current: &mut Vec<VariantSelection>,
    out: &mut Vec<VariantCombination>,
    prior: &HashMap<&str, &VariantCombination>,
) {
    if depth == options.len() {
        let pairs: Vec<(&OptionId, &str)> = current
            .iter()
            .map(|s| (&s.option_id, s.value.as_str()))
            .collect();
        let id = combination_id(&pairs);
        let price_override = prior.get(id.as_str()).and_then(|c| c.price_override);
        out.push(VariantCombination {
            id,
            selections: current.clone(),
            price_override,
        });
        return;
    }

    let option = options[depth];
    for value in option.valid_values() {
        current.push(VariantSelection {
            option_id: option.id.clone(),
            option_name: option.name.clone(),
            value: value.to_string(),
        });
        expand(options, depth + 1, current, out, prior);
        current.pop();
    }
}
