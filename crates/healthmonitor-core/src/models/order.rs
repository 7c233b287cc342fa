// ABOUTME: Food order models: restaurant metadata, order items, and inbound order requests
// ABOUTME: Order and FoodItem are the validated, immutable inputs to order analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use super::nutrition::NutritionVector;

/// Catalog identifier as it appears in provider and client payloads
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogId {
    Text(String),
    Number(Number),
}

/// Accept catalog ids as JSON strings or numbers (USDA sends `"fdcId": 171688`)
fn deserialize_catalog_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<CatalogId>::deserialize(deserializer)?.map(|id| match id {
            CatalogId::Text(text) => text,
            CatalogId::Number(number) => number.to_string(),
        }),
    )
}

/// Restaurant the order was placed with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Restaurant name (required for a valid order)
    #[serde(default)]
    pub name: String,
    /// Cuisine label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Free-text location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Channel through which the order was placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderSource {
    /// Entered by hand
    #[default]
    Manual,
    /// Uber Eats
    UberEats,
    /// `DoorDash`
    Doordash,
    /// Grubhub
    Grubhub,
    /// Anything else
    Other,
}

/// One validated line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Item name as entered
    pub name: String,
    /// Identifier in the nutrition provider's catalog
    #[serde(
        default,
        deserialize_with = "deserialize_catalog_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_id: Option<String>,
    /// Units ordered, always > 0 after validation
    pub quantity: f64,
    /// Ingredient list in entry order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Resolved nutrition for one unit
    pub nutrition_per_unit: NutritionVector,
}

impl FoodItem {
    /// Nutrition for the whole line (`nutrition_per_unit * quantity`)
    #[must_use]
    pub fn effective_nutrition(&self) -> NutritionVector {
        self.nutrition_per_unit.scaled(self.quantity)
    }
}

/// A validated order ready for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Restaurant metadata
    pub restaurant: Restaurant,
    /// When the order was placed
    pub order_date: DateTime<Utc>,
    /// Ordering channel
    #[serde(default)]
    pub source: OrderSource,
    /// Ordered items (never empty)
    pub items: Vec<FoodItem>,
    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Item as submitted by a caller, before validation and nutrition resolution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    /// Item name
    #[serde(default)]
    pub name: String,
    /// Provider catalog identifier (`fdcId` accepted for USDA payloads)
    #[serde(
        default,
        alias = "fdcId",
        deserialize_with = "deserialize_catalog_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_id: Option<String>,
    /// Units ordered; validated against the configured quantity policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Nutrition supplied inline by the caller
    #[serde(
        default,
        alias = "nutritionPerUnit",
        skip_serializing_if = "Option::is_none"
    )]
    pub nutrition: Option<NutritionVector>,
}

/// Order as submitted by a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Restaurant metadata; a missing or unnamed restaurant is rejected
    #[serde(default)]
    pub restaurant: Option<Restaurant>,
    /// Order timestamp, defaults to submission time
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    /// Ordering channel
    #[serde(default)]
    pub source: OrderSource,
    /// Submitted items
    #[serde(default)]
    pub items: Vec<NewOrderItem>,
    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}
