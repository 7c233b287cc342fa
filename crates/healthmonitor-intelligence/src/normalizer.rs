// ABOUTME: Nutrition normalizer mapping heterogeneous raw nutrient data into canonical vectors
// ABOUTME: Tagged raw record variant, substring name classification, and a total JSON parser
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! # Nutrition Normalizer
//!
//! Providers report nutrients as loosely named `(name, amount)` pairs. The
//! normalizer classifies each name by substring into one canonical field, using
//! a fixed rule order where the first matching rule wins:
//!
//! | Name contains              | Field         |
//! |----------------------------|---------------|
//! | `energy`, `calorie`        | calories      |
//! | `protein`                  | protein       |
//! | `carbohydrate`             | carbs         |
//! | `total lipid`, `fat`       | fat           |
//! | `fiber`                    | fiber         |
//! | `sugars`                   | sugar         |
//! | `sodium`                   | sodium        |
//! | `cholesterol`              | cholesterol   |
//!
//! Unmatched names are ignored. When several entries classify into the same
//! field the first entry wins, so `Energy` in kcal listed before `Energy` in kJ
//! keeps the kcal value. Overwriting instead would let `Fatty acids, total
//! saturated`, which also matches `fat`, replace the `Total lipid (fat)` total.

use healthmonitor_core::models::NutritionVector;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One `(name, amount)` pair as reported by a nutrition provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderNutrient {
    /// Provider's nutrient label (e.g. "Total lipid (fat)")
    pub nutrient_name: String,
    /// Amount in the provider's unit for that nutrient
    pub amount: f64,
}

impl ProviderNutrient {
    /// Create a provider nutrient entry
    pub fn new(nutrient_name: impl Into<String>, amount: f64) -> Self {
        Self {
            nutrient_name: nutrient_name.into(),
            amount,
        }
    }
}

/// Raw nutrition data before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawNutrientRecord {
    /// Loosely named entries from an external provider
    Provider(Vec<ProviderNutrient>),
    /// Already canonical, e.g. supplied inline by the caller
    Canonical(NutritionVector),
    /// Lookup returned nothing usable
    NotFound,
}

/// Canonical field a provider nutrient maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    /// Energy
    Calories,
    /// Protein
    Protein,
    /// Carbohydrates
    Carbs,
    /// Total fat
    Fat,
    /// Dietary fiber
    Fiber,
    /// Sugars
    Sugar,
    /// Sodium
    Sodium,
    /// Cholesterol
    Cholesterol,
}

const CLASSIFICATION_RULES: [(&[&str], NutrientField); 8] = [
    (&["energy", "calorie"], NutrientField::Calories),
    (&["protein"], NutrientField::Protein),
    (&["carbohydrate"], NutrientField::Carbs),
    (&["total lipid", "fat"], NutrientField::Fat),
    (&["fiber"], NutrientField::Fiber),
    (&["sugars"], NutrientField::Sugar),
    (&["sodium"], NutrientField::Sodium),
    (&["cholesterol"], NutrientField::Cholesterol),
];

/// Canonical keys that mark a JSON object as an already-normalized vector
const CANONICAL_KEYS: [&str; 9] = [
    "calories",
    "protein",
    "carbs",
    "fat",
    "fiber",
    "sugar",
    "sodium",
    "cholesterol",
    "saturatedFat",
];

/// Classify a provider nutrient name into its canonical field
#[must_use]
pub fn classify(nutrient_name: &str) -> Option<NutrientField> {
    let name = nutrient_name.to_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| name.contains(needle)))
        .map(|(_, field)| *field)
}

/// Outcome of normalizing one raw record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalized {
    /// A complete canonical vector
    Found(NutritionVector),
    /// Nothing could be resolved
    NotFound,
}

impl Normalized {
    /// The resolved vector, or zero for an unresolved record
    #[must_use]
    pub const fn unwrap_or_zero(self) -> NutritionVector {
        match self {
            Self::Found(vector) => vector,
            Self::NotFound => NutritionVector::ZERO,
        }
    }

    /// Whether a vector was resolved
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Normalize a raw record into a complete canonical vector.
///
/// Never fails: a `NotFound` record yields [`Normalized::NotFound`] and callers
/// substitute a zero vector.
#[must_use]
pub fn normalize(record: &RawNutrientRecord) -> Normalized {
    match record {
        RawNutrientRecord::Provider(entries) => Normalized::Found(normalize_provider(entries)),
        RawNutrientRecord::Canonical(vector) => Normalized::Found(vector.sanitized()),
        RawNutrientRecord::NotFound => Normalized::NotFound,
    }
}

fn normalize_provider(entries: &[ProviderNutrient]) -> NutritionVector {
    let mut vector = NutritionVector::ZERO;
    let mut seen: Vec<NutrientField> = Vec::with_capacity(CLASSIFICATION_RULES.len());

    for entry in entries {
        let Some(field) = classify(&entry.nutrient_name) else {
            continue;
        };
        if seen.contains(&field) {
            debug!(
                nutrient = %entry.nutrient_name,
                "Ignoring duplicate nutrient entry"
            );
            continue;
        }
        seen.push(field);

        let amount = if entry.amount.is_finite() && entry.amount > 0.0 {
            entry.amount
        } else {
            0.0
        };
        *field_mut(&mut vector, field) = amount;
    }

    vector
}

fn field_mut(vector: &mut NutritionVector, field: NutrientField) -> &mut f64 {
    match field {
        NutrientField::Calories => &mut vector.calories,
        NutrientField::Protein => &mut vector.protein,
        NutrientField::Carbs => &mut vector.carbs,
        NutrientField::Fat => &mut vector.fat,
        NutrientField::Fiber => &mut vector.fiber,
        NutrientField::Sugar => &mut vector.sugar,
        NutrientField::Sodium => &mut vector.sodium,
        NutrientField::Cholesterol => &mut vector.cholesterol,
    }
}

impl RawNutrientRecord {
    /// Map arbitrary JSON into a raw record. Total: malformed input is `NotFound`.
    ///
    /// Accepted shapes:
    /// - an array of `{nutrientName | name | nutrient.name, amount | value}` entries
    /// - a provider detail object carrying such an array under `foodNutrients`
    /// - an object with canonical keys (`calories`, `protein`, ...)
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(entries) => Self::from_entries(entries),
            Value::Object(map) => {
                if let Some(Value::Array(entries)) = map.get("foodNutrients") {
                    return Self::from_entries(entries);
                }
                if CANONICAL_KEYS.iter().any(|key| map.contains_key(*key)) {
                    return serde_json::from_value::<NutritionVector>(value.clone())
                        .map_or(Self::NotFound, Self::Canonical);
                }
                Self::NotFound
            }
            _ => Self::NotFound,
        }
    }

    fn from_entries(entries: &[Value]) -> Self {
        let parsed: Vec<ProviderNutrient> = entries.iter().filter_map(parse_entry).collect();
        if parsed.is_empty() && !entries.is_empty() {
            return Self::NotFound;
        }
        Self::Provider(parsed)
    }
}

fn parse_entry(entry: &Value) -> Option<ProviderNutrient> {
    let name = entry
        .get("nutrientName")
        .or_else(|| entry.get("name"))
        .or_else(|| entry.get("nutrient").and_then(|n| n.get("name")))
        .and_then(Value::as_str)?;
    let amount = entry
        .get("amount")
        .or_else(|| entry.get("value"))
        .and_then(Value::as_f64)?;
    Some(ProviderNutrient::new(name, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_energy_and_protein_only() {
        let record = RawNutrientRecord::Provider(vec![
            ProviderNutrient::new("Energy", 200.0),
            ProviderNutrient::new("Protein", 10.0),
        ]);

        let vector = normalize(&record).unwrap_or_zero();
        assert!((vector.calories - 200.0).abs() < f64::EPSILON);
        assert!((vector.protein - 10.0).abs() < f64::EPSILON);
        assert!(vector.carbs.abs() < f64::EPSILON);
        assert!(vector.fat.abs() < f64::EPSILON);
        assert!(vector.sodium.abs() < f64::EPSILON);
        assert!(vector.saturated_fat.abs() < f64::EPSILON);
    }

    #[test]
    fn test_classification_order() {
        assert_eq!(classify("Energy"), Some(NutrientField::Calories));
        assert_eq!(classify("Carbohydrate, by difference"), Some(NutrientField::Carbs));
        assert_eq!(classify("Total lipid (fat)"), Some(NutrientField::Fat));
        assert_eq!(classify("Fiber, total dietary"), Some(NutrientField::Fiber));
        assert_eq!(classify("Sugars, total including NLEA"), Some(NutrientField::Sugar));
        assert_eq!(classify("Sodium, Na"), Some(NutrientField::Sodium));
        assert_eq!(classify("Cholesterol"), Some(NutrientField::Cholesterol));
        assert_eq!(classify("Vitamin C, total ascorbic acid"), None);
    }

    #[test]
    fn test_first_entry_wins_for_duplicate_fields() {
        let record = RawNutrientRecord::Provider(vec![
            ProviderNutrient::new("Total lipid (fat)", 12.0),
            ProviderNutrient::new("Energy", 250.0),
            ProviderNutrient::new("Energy", 1046.0),
            ProviderNutrient::new("Fatty acids, total saturated", 4.0),
        ]);

        let vector = normalize(&record).unwrap_or_zero();
        assert!((vector.calories - 250.0).abs() < f64::EPSILON);
        assert!((vector.fat - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_not_found_substitutes_zero() {
        let normalized = normalize(&RawNutrientRecord::NotFound);
        assert!(!normalized.is_found());
        assert_eq!(normalized.unwrap_or_zero(), NutritionVector::ZERO);
    }

    #[test]
    fn test_from_json_is_total() {
        assert_eq!(RawNutrientRecord::from_json(&Value::Null), RawNutrientRecord::NotFound);
        assert_eq!(RawNutrientRecord::from_json(&json!("apple")), RawNutrientRecord::NotFound);
        assert_eq!(RawNutrientRecord::from_json(&json!([1, 2])), RawNutrientRecord::NotFound);
        assert_eq!(
            RawNutrientRecord::from_json(&json!({"description": "Apple"})),
            RawNutrientRecord::NotFound
        );
        assert_eq!(
            RawNutrientRecord::from_json(&json!({"calories": "lots"})),
            RawNutrientRecord::NotFound
        );
    }

    #[test]
    fn test_from_json_accepts_usda_detail_shape() {
        let record = RawNutrientRecord::from_json(&json!({
            "fdcId": 171_688,
            "foodNutrients": [
                {"nutrient": {"id": 1008, "name": "Energy", "unitName": "kcal"}, "amount": 52.0},
                {"nutrient": {"id": 1093, "name": "Sodium, Na", "unitName": "mg"}, "amount": 1.0},
                {"nutrient": {"id": 1003, "name": "Protein"}}
            ]
        }));

        let vector = normalize(&record).unwrap_or_zero();
        assert!((vector.calories - 52.0).abs() < f64::EPSILON);
        assert!((vector.sodium - 1.0).abs() < f64::EPSILON);
        assert!(vector.protein.abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_canonical_object_is_sanitized() {
        let record = RawNutrientRecord::from_json(&json!({"calories": 300.0, "sodium": -4.0}));
        let vector = normalize(&record).unwrap_or_zero();

        assert!((vector.calories - 300.0).abs() < f64::EPSILON);
        assert!(vector.sodium.abs() < f64::EPSILON);
    }
}
