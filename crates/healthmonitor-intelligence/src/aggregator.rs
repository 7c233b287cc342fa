// ABOUTME: Order aggregator scaling item nutrition by quantity and summing order totals
// ABOUTME: Also validates inbound orders against the configured quantity policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use healthmonitor_core::models::{
    FoodItem, NewOrder, NewOrderItem, NutritionVector, Order, OrderSource, OrderTotals, Restaurant,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{AppError, AppResult};

/// How a non-positive, non-finite, or missing item quantity is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityPolicy {
    /// Reject the order with a validation error
    #[default]
    Reject,
    /// Treat the quantity as a single unit
    Lenient,
}

impl QuantityPolicy {
    /// Resolve a submitted quantity under this policy
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` (or `MissingRequiredField` for an absent
    /// quantity) under [`QuantityPolicy::Reject`] when the quantity is not a
    /// positive finite number.
    pub fn resolve(self, item_name: &str, quantity: Option<f64>) -> AppResult<f64> {
        match (self, quantity) {
            (_, Some(q)) if q.is_finite() && q > 0.0 => Ok(q),
            (Self::Lenient, _) => Ok(1.0),
            (Self::Reject, None) => Err(AppError::missing_field("quantity")
                .with_resource_id(item_name.to_owned())),
            (Self::Reject, Some(q)) => Err(AppError::value_out_of_range(format!(
                "quantity for '{item_name}' must be a positive number, got {q}"
            ))
            .with_details(json!({ "field": "quantity", "item": item_name }))),
        }
    }
}

impl fmt::Display for QuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => f.write_str("reject"),
            Self::Lenient => f.write_str("lenient"),
        }
    }
}

impl FromStr for QuantityPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" | "strict" => Ok(Self::Reject),
            "lenient" | "default-one" => Ok(Self::Lenient),
            other => Err(AppError::invalid_input(format!(
                "Unknown quantity policy: '{other}'. Valid options: reject, lenient"
            ))),
        }
    }
}

/// An item that passed validation but whose nutrition is not yet resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    /// Trimmed, non-empty name
    pub name: String,
    /// Provider catalog identifier
    pub external_id: Option<String>,
    /// Positive finite quantity
    pub quantity: f64,
    /// Ingredient list
    pub ingredients: Vec<String>,
    /// Nutrition supplied inline by the caller
    pub inline_nutrition: Option<NutritionVector>,
}

/// An order that passed validation, awaiting nutrition resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    /// Named restaurant
    pub restaurant: Restaurant,
    /// Order timestamp
    pub order_date: DateTime<Utc>,
    /// Ordering channel
    pub source: OrderSource,
    /// At least one item
    pub items: Vec<ValidatedItem>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl ValidatedOrder {
    /// Attach resolved per-unit nutrition, one vector per item in order.
    ///
    /// Items without a matching vector contribute zero.
    #[must_use]
    pub fn into_order(self, nutrition: Vec<NutritionVector>) -> Order {
        let mut nutrition = nutrition.into_iter();
        let items = self
            .items
            .into_iter()
            .map(|item| FoodItem {
                name: item.name,
                external_id: item.external_id,
                quantity: item.quantity,
                ingredients: item.ingredients,
                nutrition_per_unit: nutrition.next().unwrap_or(NutritionVector::ZERO),
            })
            .collect();

        Order {
            restaurant: self.restaurant,
            order_date: self.order_date,
            source: self.source,
            items,
            notes: self.notes,
        }
    }
}

/// Validate an inbound order before any lookup or analysis runs
///
/// # Errors
///
/// Returns a validation error when the restaurant is missing or unnamed, the
/// item list is empty, an item name is empty, or a quantity is rejected by
/// `policy`.
pub fn validate_order(
    order: NewOrder,
    policy: QuantityPolicy,
    now: DateTime<Utc>,
) -> AppResult<ValidatedOrder> {
    let restaurant = order
        .restaurant
        .filter(|r| !r.name.trim().is_empty())
        .ok_or_else(|| AppError::missing_field("restaurant.name"))?;

    if order.items.is_empty() {
        return Err(AppError::invalid_input("Order must contain at least one item")
            .with_details(json!({ "field": "items" })));
    }

    let items = order
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item, policy))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ValidatedOrder {
        restaurant,
        order_date: order.order_date.unwrap_or(now),
        source: order.source,
        items,
        notes: order.notes,
    })
}

fn validate_item(
    index: usize,
    item: NewOrderItem,
    policy: QuantityPolicy,
) -> AppResult<ValidatedItem> {
    let name = item.name.trim();
    if name.is_empty() {
        return Err(AppError::missing_field(format!("items[{index}].name")));
    }
    let quantity = policy.resolve(name, item.quantity)?;

    Ok(ValidatedItem {
        name: name.to_owned(),
        external_id: item.external_id.filter(|id| !id.trim().is_empty()),
        quantity,
        ingredients: item.ingredients,
        inline_nutrition: item.nutrition,
    })
}

/// Sum effective item nutrition into order totals
#[must_use]
pub fn aggregate_totals(items: &[FoodItem]) -> OrderTotals {
    items
        .iter()
        .fold(OrderTotals::default(), |mut totals, item| {
            totals += &item.effective_nutrition();
            totals
        })
}
