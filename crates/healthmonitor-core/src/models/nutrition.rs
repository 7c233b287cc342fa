// ABOUTME: Canonical nutrition vector and order-level nutrition totals
// ABOUTME: NutritionVector arithmetic (scale, add) and the tracked OrderTotals subset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

/// Complete nutrient record for one unit of an item as entered.
///
/// Every field is always present; nutrients a source does not report are `0.0`.
/// Amounts are calories in kcal, sodium and cholesterol in mg, everything else in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionVector {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Total fat (g)
    pub fat: f64,
    /// Dietary fiber (g)
    pub fiber: f64,
    /// Total sugars (g)
    pub sugar: f64,
    /// Sodium (mg)
    pub sodium: f64,
    /// Cholesterol (mg)
    pub cholesterol: f64,
    /// Saturated fat (g)
    pub saturated_fat: f64,
}

impl NutritionVector {
    /// All-zero vector substituted for unresolved items
    pub const ZERO: Self = Self {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        fiber: 0.0,
        sugar: 0.0,
        sodium: 0.0,
        cholesterol: 0.0,
        saturated_fat: 0.0,
    };

    /// Multiply every nutrient by `factor`
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            sugar: self.sugar * factor,
            sodium: self.sodium * factor,
            cholesterol: self.cholesterol * factor,
            saturated_fat: self.saturated_fat * factor,
        }
    }

    /// Replace negative or non-finite amounts with zero
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            calories: clean(self.calories),
            protein: clean(self.protein),
            carbs: clean(self.carbs),
            fat: clean(self.fat),
            fiber: clean(self.fiber),
            sugar: clean(self.sugar),
            sodium: clean(self.sodium),
            cholesterol: clean(self.cholesterol),
            saturated_fat: clean(self.saturated_fat),
        }
    }
}

impl Add for NutritionVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            fiber: self.fiber + rhs.fiber,
            sugar: self.sugar + rhs.sugar,
            sodium: self.sodium + rhs.sodium,
            cholesterol: self.cholesterol + rhs.cholesterol,
            saturated_fat: self.saturated_fat + rhs.saturated_fat,
        }
    }
}

impl Mul<f64> for NutritionVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scaled(rhs)
    }
}

/// Order-level totals. Only these five nutrients are tracked per order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderTotals {
    /// Total energy (kcal)
    pub calories: f64,
    /// Total protein (g)
    pub protein: f64,
    /// Total carbohydrates (g)
    pub carbs: f64,
    /// Total fat (g)
    pub fat: f64,
    /// Total sodium (mg)
    pub sodium: f64,
}

impl AddAssign<&NutritionVector> for OrderTotals {
    fn add_assign(&mut self, rhs: &NutritionVector) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fat += rhs.fat;
        self.sodium += rhs.sodium;
    }
}

impl From<&NutritionVector> for OrderTotals {
    fn from(vector: &NutritionVector) -> Self {
        let mut totals = Self::default();
        totals += vector;
        totals
    }
}
