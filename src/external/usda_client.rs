// ABOUTME: USDA FoodData Central API client resolving catalog ids into raw nutrient records
// ABOUTME: Implements detail retrieval with TTL caching and per-minute rate limiting, plus a mock provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HealthMonitor Contributors

//! USDA `FoodData` Central API Client
//!
//! Resolves a `FoodData` Central id (`fdcId`) into a [`RawNutrientRecord`] for
//! the nutrition normalizer.
//!
//! # Features
//! - Detailed food retrieval (`GET /food/{fdcId}`)
//! - TTL caching to minimize API calls (24 hours by default)
//! - Rate limiting (30 requests per minute by default)
//! - Mock provider for tests and offline runs
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use healthmonitor_core::constants::service_names;
use healthmonitor_intelligence::{ProviderNutrient, RawNutrientRecord};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::time::sleep;
use tracing::debug;

use super::{status_error, NutritionProvider};
use crate::config::UsdaApiConfig;
use crate::errors::{AppError, AppResult};

/// Rate limiting window
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// USDA Food Nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodNutrient {
    /// Nutrient ID
    pub nutrient_id: u32,
    /// Nutrient name (e.g., "Protein", "Energy")
    pub nutrient_name: String,
    /// Nutrient unit (e.g., "g", "kcal", "mg")
    pub unit_name: String,
    /// Amount per 100g
    pub amount: f64,
}

impl FoodNutrient {
    fn new(nutrient_id: u32, nutrient_name: &str, unit_name: &str, amount: f64) -> Self {
        Self {
            nutrient_id,
            nutrient_name: nutrient_name.to_owned(),
            unit_name: unit_name.to_owned(),
            amount,
        }
    }
}

/// Detailed USDA Food Information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDetails {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    pub description: String,
    /// Data type (e.g., "Foundation", "SR Legacy")
    pub data_type: String,
    /// Nutrients in the order the API listed them
    pub food_nutrients: Vec<FoodNutrient>,
}

impl FoodDetails {
    /// Raw record for the normalizer, preserving the API's nutrient order
    #[must_use]
    pub fn to_raw_record(&self) -> RawNutrientRecord {
        RawNutrientRecord::Provider(
            self.food_nutrients
                .iter()
                .map(|n| ProviderNutrient::new(n.nutrient_name.clone(), n.amount))
                .collect(),
        )
    }
}

/// USDA API food details response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodDetailsResponse {
    fdc_id: u64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    data_type: String,
    #[serde(default)]
    food_nutrients: Vec<FoodNutrientResponse>,
}

#[derive(Debug, Deserialize)]
struct FoodNutrientResponse {
    nutrient: Option<NutrientInfo>,
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NutrientInfo {
    id: u32,
    name: String,
    #[serde(default)]
    unit_name: String,
}

impl From<FoodDetailsResponse> for FoodDetails {
    fn from(response: FoodDetailsResponse) -> Self {
        let food_nutrients = response
            .food_nutrients
            .into_iter()
            .filter_map(|n| {
                let nutrient = n.nutrient?;
                Some(FoodNutrient {
                    nutrient_id: nutrient.id,
                    nutrient_name: nutrient.name,
                    unit_name: nutrient.unit_name,
                    amount: n.amount.unwrap_or(0.0),
                })
            })
            .collect();

        Self {
            fdc_id: response.fdc_id,
            description: response.description,
            data_type: response.data_type,
            food_nutrients,
        }
    }
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    expires_at: Instant,
}

/// Sliding-window rate limiter for API requests
#[derive(Debug)]
struct RateLimiter {
    requests: Vec<Instant>,
    limit: u32,
    window: Duration,
}

impl RateLimiter {
    const fn new(limit: u32, window: Duration) -> Self {
        Self {
            requests: Vec::new(),
            limit,
            window,
        }
    }

    /// Record a request if the window has room, otherwise return how long to wait
    fn try_acquire(&mut self) -> Option<Duration> {
        let now = Instant::now();
        self.requests.retain(|&t| now.duration_since(t) < self.window);

        if self.requests.len() < self.limit as usize {
            self.requests.push(now);
            return None;
        }

        let oldest = self.requests.first().copied().unwrap_or(now);
        Some(self.window.saturating_sub(now.duration_since(oldest)))
    }
}

/// Parse a catalog id, returning `None` for ids USDA cannot know
fn parse_fdc_id(external_id: &str) -> Option<u64> {
    external_id.trim().parse().ok()
}

/// USDA `FoodData` Central API Client
pub struct UsdaClient {
    config: UsdaApiConfig,
    http_client: Client,
    details_cache: Arc<RwLock<HashMap<u64, CacheEntry<FoodDetails>>>>,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl UsdaClient {
    /// Create a new USDA API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: UsdaApiConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;
        let rate_limiter = RateLimiter::new(config.rate_limit_per_minute, RATE_LIMIT_WINDOW);

        Ok(Self {
            config,
            http_client,
            details_cache: Arc::new(RwLock::new(HashMap::new())),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        })
    }

    /// Wait until the rate limiter admits one more request
    async fn acquire_slot(&self) {
        loop {
            let wait = self.rate_limiter.lock().await.try_acquire();
            match wait {
                None => return,
                Some(delay) => {
                    debug!(delay_ms = delay.as_millis() as u64, "USDA rate limit reached, waiting");
                    sleep(delay.max(Duration::from_millis(10))).await;
                }
            }
        }
    }

    async fn cached_details(&self, fdc_id: u64) -> Option<FoodDetails> {
        let cache = self.details_cache.read().await;
        cache
            .get(&fdc_id)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.data.clone())
    }

    /// Get detailed information for a specific food by FDC ID.
    ///
    /// Returns `Ok(None)` when the API reports the food does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the request fails, the API
    /// answers with a non-success status other than 404, or the body is malformed
    pub async fn get_food_details(&self, fdc_id: u64) -> AppResult<Option<FoodDetails>> {
        if let Some(details) = self.cached_details(fdc_id).await {
            debug!(fdc_id, "USDA details cache hit");
            return Ok(Some(details));
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config("USDA_API_KEY is not configured"))?;

        self.acquire_slot().await;

        let url = format!("{}/food/{fdc_id}", self.config.base_url.trim_end_matches('/'));
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await
            .map_err(|e| {
                AppError::external_unavailable(service_names::USDA_API, e.to_string())
                    .with_source(e)
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(status_error(service_names::USDA_API, status, &detail));
        }

        let details: FoodDetails = response
            .json::<FoodDetailsResponse>()
            .await
            .map_err(|e| {
                AppError::external_service(
                    service_names::USDA_API,
                    format!("JSON parse error: {e}"),
                )
            })?
            .into();

        {
            let mut cache = self.details_cache.write().await;
            cache.insert(
                fdc_id,
                CacheEntry {
                    data: details.clone(),
                    expires_at: Instant::now() + Duration::from_secs(self.config.cache_ttl_secs),
                },
            );
        }

        Ok(Some(details))
    }

    /// Clear the details cache
    pub async fn clear_cache(&self) {
        self.details_cache.write().await.clear();
    }

    /// Number of cached food details
    pub async fn cache_size(&self) -> usize {
        self.details_cache.read().await.len()
    }
}

#[async_trait]
impl NutritionProvider for UsdaClient {
    async fn lookup(&self, external_id: &str) -> AppResult<RawNutrientRecord> {
        let Some(fdc_id) = parse_fdc_id(external_id) else {
            debug!(external_id, "Not a USDA FDC id");
            return Ok(RawNutrientRecord::NotFound);
        };

        Ok(self
            .get_food_details(fdc_id)
            .await?
            .map_or(RawNutrientRecord::NotFound, |details| details.to_raw_record()))
    }

    fn name(&self) -> &'static str {
        service_names::USDA_API
    }
}

/// Mock USDA provider for tests and offline runs (no API calls)
#[derive(Debug, Clone)]
pub struct MockUsdaClient {
    mock_foods: HashMap<u64, FoodDetails>,
}

impl MockUsdaClient {
    /// Create a mock provider with predefined test data
    #[must_use]
    pub fn new() -> Self {
        let foods = [
            FoodDetails {
                fdc_id: 171_477,
                description: "Chicken, breast, meat only, cooked, roasted".to_owned(),
                data_type: "SR Legacy".to_owned(),
                food_nutrients: vec![
                    FoodNutrient::new(1003, "Protein", "g", 31.02),
                    FoodNutrient::new(1004, "Total lipid (fat)", "g", 3.57),
                    FoodNutrient::new(1005, "Carbohydrate, by difference", "g", 0.0),
                    FoodNutrient::new(1008, "Energy", "kcal", 165.0),
                    FoodNutrient::new(1093, "Sodium, Na", "mg", 74.0),
                    FoodNutrient::new(1253, "Cholesterol", "mg", 85.0),
                ],
            },
            FoodDetails {
                fdc_id: 171_688,
                description: "Apples, raw, with skin".to_owned(),
                data_type: "SR Legacy".to_owned(),
                food_nutrients: vec![
                    FoodNutrient::new(1003, "Protein", "g", 0.26),
                    FoodNutrient::new(1004, "Total lipid (fat)", "g", 0.17),
                    FoodNutrient::new(1005, "Carbohydrate, by difference", "g", 13.81),
                    FoodNutrient::new(1008, "Energy", "kcal", 52.0),
                    FoodNutrient::new(1079, "Fiber, total dietary", "g", 2.4),
                    FoodNutrient::new(2000, "Sugars, total including NLEA", "g", 10.39),
                    FoodNutrient::new(1093, "Sodium, Na", "mg", 1.0),
                ],
            },
            FoodDetails {
                fdc_id: 172_470,
                description: "Peanut butter, smooth style, with salt".to_owned(),
                data_type: "SR Legacy".to_owned(),
                food_nutrients: vec![
                    FoodNutrient::new(1008, "Energy", "kcal", 588.0),
                    FoodNutrient::new(1062, "Energy", "kJ", 2460.0),
                    FoodNutrient::new(1003, "Protein", "g", 25.09),
                    FoodNutrient::new(1004, "Total lipid (fat)", "g", 50.39),
                    FoodNutrient::new(1258, "Fatty acids, total saturated", "g", 10.29),
                    FoodNutrient::new(1005, "Carbohydrate, by difference", "g", 19.56),
                    FoodNutrient::new(1093, "Sodium, Na", "mg", 459.0),
                ],
            },
        ];

        Self {
            mock_foods: foods.into_iter().map(|f| (f.fdc_id, f)).collect(),
        }
    }

    /// Add or replace a mock food
    #[must_use]
    pub fn with_food(mut self, details: FoodDetails) -> Self {
        self.mock_foods.insert(details.fdc_id, details);
        self
    }

    /// Mock details implementation
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if food with given FDC ID doesn't exist
    pub fn get_food_details(&self, fdc_id: u64) -> AppResult<FoodDetails> {
        self.mock_foods
            .get(&fdc_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Food with FDC ID {fdc_id}")))
    }
}

impl Default for MockUsdaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NutritionProvider for MockUsdaClient {
    async fn lookup(&self, external_id: &str) -> AppResult<RawNutrientRecord> {
        Ok(parse_fdc_id(external_id)
            .and_then(|id| self.mock_foods.get(&id))
            .map_or(RawNutrientRecord::NotFound, FoodDetails::to_raw_record))
    }

    fn name(&self) -> &'static str {
        "mock USDA"
    }
}
