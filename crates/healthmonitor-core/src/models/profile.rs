// ABOUTME: Read-only health profile snapshot used to extend order analysis
// ABOUTME: Allergies with severity, diet type, and chronic conditions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use serde::{Deserialize, Serialize};

/// Severity of a declared allergy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllergySeverity {
    /// Mild reaction
    Mild,
    /// Moderate reaction
    Moderate,
    /// Severe reaction
    Severe,
    /// Anaphylaxis risk
    LifeThreatening,
}

/// One declared allergen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergy {
    /// Allergen keyword, matched case-insensitively against item names and ingredients
    pub allergen: String,
    /// Declared severity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<AllergySeverity>,
}

impl Allergy {
    /// Allergy without a declared severity
    pub fn new(allergen: impl Into<String>) -> Self {
        Self {
            allergen: allergen.into(),
            severity: None,
        }
    }
}

/// Declared diet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    /// No restriction
    #[default]
    Omnivore,
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// Fish but no meat
    Pescatarian,
    /// Low carbohydrate
    Keto,
    /// Paleolithic
    Paleo,
    /// Anything unrecognised
    #[serde(other)]
    Other,
}

impl DietType {
    /// Parse diet type from string, mapping unknown values to `Other`
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "omnivore" => Self::Omnivore,
            "vegetarian" => Self::Vegetarian,
            "vegan" => Self::Vegan,
            "pescatarian" => Self::Pescatarian,
            "keto" => Self::Keto,
            "paleo" => Self::Paleo,
            _ => Self::Other,
        }
    }
}

/// Severity of a chronic condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionSeverity {
    /// Mild
    Mild,
    /// Moderate
    Moderate,
    /// Severe
    Severe,
}

/// A diagnosed chronic condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronicCondition {
    /// Free-text condition name (e.g. "Hypertension")
    pub condition: String,
    /// Declared severity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<ConditionSeverity>,
}

/// Health profile snapshot supplied by the profile collaborator.
///
/// The engine never mutates a profile; absence of a profile is a normal input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthProfile {
    /// Declared allergies
    pub allergies: Vec<Allergy>,
    /// Declared diet
    pub diet_type: Option<DietType>,
    /// Chronic conditions
    pub chronic_conditions: Vec<ChronicCondition>,
}
