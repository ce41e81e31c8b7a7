//! Food retrieval: external providers tried in order, with a generic record
//! as the last resort.
//!
//! Providers only fetch and parse. Response parsing is kept in free
//! functions so it can be tested without network access.

use serde::Deserialize;
use thiserror::Error;

use super::normalize::{extract_description, extract_ingredients};
use super::{FoodRecord, FoodSource};
use crate::config;
use crate::matching::TermSet;

const USDA_SEARCH_URL: &str = "https://api.nal.usda.gov/fdc/v1/foods/search";
const WIKIPEDIA_SUMMARY_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: &'static str, status: u16 },

    #[error("Response parsing failed: {0}")]
    Parse(String),

    #[error("Invalid request URL: {0}")]
    Url(String),
}

/// A source of food information.
pub trait FoodProvider {
    /// Provenance tag of records produced by this provider.
    fn source(&self) -> FoodSource;

    /// Look up a food. `Ok(None)` means the source has nothing on it.
    fn fetch(&self, food_name: &str) -> Result<Option<FoodRecord>, RetrievalError>;
}

fn build_client() -> Result<reqwest::blocking::Client, RetrievalError> {
    reqwest::blocking::Client::builder()
        .timeout(config::http_timeout())
        .user_agent(format!("{}/{}", config::APP_NAME, config::APP_VERSION))
        .build()
        .map_err(|e| RetrievalError::HttpClient(e.to_string()))
}

fn map_send_error(e: reqwest::Error) -> RetrievalError {
    if e.is_timeout() {
        RetrievalError::Timeout(config::http_timeout().as_secs())
    } else {
        RetrievalError::HttpClient(e.to_string())
    }
}

// ═══════════════════════════════════════════════════════════
// USDA FoodData Central
// ═══════════════════════════════════════════════════════════

/// FoodData Central search API. Branded foods carry an ingredient statement.
pub struct UsdaProvider {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl UsdaProvider {
    pub fn new(api_key: String) -> Result<Self, RetrievalError> {
        Ok(Self {
            client: build_client()?,
            api_key,
        })
    }
}

#[derive(Deserialize)]
struct UsdaSearchResponse {
    #[serde(default)]
    foods: Vec<UsdaFood>,
}

#[derive(Deserialize)]
struct UsdaFood {
    #[serde(default)]
    description: String,
    #[serde(default)]
    ingredients: Option<String>,
}

impl FoodProvider for UsdaProvider {
    fn source(&self) -> FoodSource {
        FoodSource::UsdaFoodDataCentral
    }

    fn fetch(&self, food_name: &str) -> Result<Option<FoodRecord>, RetrievalError> {
        let response = self
            .client
            .get(USDA_SEARCH_URL)
            .query(&[
                ("query", food_name),
                ("pageSize", "1"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status {
                source_name: "FoodData Central",
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| RetrievalError::HttpClient(e.to_string()))?;
        parse_usda_search(food_name, &body)
    }
}

/// Turn a FoodData Central search response into a record from its first hit.
pub fn parse_usda_search(
    food_name: &str,
    body: &str,
) -> Result<Option<FoodRecord>, RetrievalError> {
    let parsed: UsdaSearchResponse =
        serde_json::from_str(body).map_err(|e| RetrievalError::Parse(e.to_string()))?;

    let Some(food) = parsed.foods.into_iter().next() else {
        return Ok(None);
    };

    let ingredients: TermSet = food
        .ingredients
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|item| item.trim().trim_end_matches('.').trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect();

    let description = if food.description.trim().is_empty() {
        format!("Information about {food_name} from USDA Food Data Central")
    } else {
        food.description.trim().to_string()
    };

    Ok(Some(FoodRecord {
        name: food_name.to_string(),
        ingredients: ingredients.into(),
        description,
        source: FoodSource::UsdaFoodDataCentral,
    }))
}

// ═══════════════════════════════════════════════════════════
// Wikipedia
// ═══════════════════════════════════════════════════════════

/// Wikipedia page summaries. Ingredients are mined from the article prose.
pub struct WikipediaProvider {
    client: reqwest::blocking::Client,
}

impl WikipediaProvider {
    pub fn new() -> Result<Self, RetrievalError> {
        Ok(Self {
            client: build_client()?,
        })
    }
}

#[derive(Deserialize)]
struct WikipediaSummary {
    #[serde(rename = "type", default)]
    page_type: String,
    #[serde(default)]
    extract: String,
}

impl FoodProvider for WikipediaProvider {
    fn source(&self) -> FoodSource {
        FoodSource::Wikipedia
    }

    fn fetch(&self, food_name: &str) -> Result<Option<FoodRecord>, RetrievalError> {
        let mut url = reqwest::Url::parse(WIKIPEDIA_SUMMARY_URL)
            .map_err(|e| RetrievalError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| RetrievalError::Url(WIKIPEDIA_SUMMARY_URL.to_string()))?
            .pop_if_empty()
            .push(&wikipedia_title(food_name));

        let response = self.client.get(url).send().map_err(map_send_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RetrievalError::Status {
                source_name: "Wikipedia",
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .map_err(|e| RetrievalError::HttpClient(e.to_string()))?;
        parse_wikipedia_summary(food_name, &body)
    }
}

/// "green tea" → "Green_tea"
pub fn wikipedia_title(food_name: &str) -> String {
    let joined = food_name.split_whitespace().collect::<Vec<_>>().join("_");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a page-summary response into a record. Disambiguation pages and
/// empty extracts count as "nothing found".
pub fn parse_wikipedia_summary(
    food_name: &str,
    body: &str,
) -> Result<Option<FoodRecord>, RetrievalError> {
    let summary: WikipediaSummary =
        serde_json::from_str(body).map_err(|e| RetrievalError::Parse(e.to_string()))?;

    if summary.page_type == "disambiguation" || summary.extract.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(FoodRecord {
        name: food_name.to_string(),
        ingredients: extract_ingredients(&summary.extract),
        description: extract_description(&summary.extract),
        source: FoodSource::Wikipedia,
    }))
}

// ═══════════════════════════════════════════════════════════
// Catalog
// ═══════════════════════════════════════════════════════════

/// Ordered provider chain.
pub struct FoodCatalog {
    providers: Vec<Box<dyn FoodProvider>>,
}

impl FoodCatalog {
    pub fn new(providers: Vec<Box<dyn FoodProvider>>) -> Self {
        Self { providers }
    }

    /// FoodData Central first, then Wikipedia.
    pub fn online() -> Result<Self, RetrievalError> {
        Ok(Self::new(vec![
            Box::new(UsdaProvider::new(config::usda_api_key())?),
            Box::new(WikipediaProvider::new()?),
        ]))
    }

    /// First record any provider returns.
    ///
    /// Provider errors are logged and skipped. If no provider knows the food
    /// the result is a `General` record; if every provider failed it is a
    /// `Default` record.
    pub fn lookup(&self, food_name: &str) -> FoodRecord {
        let mut failures = 0;
        for provider in &self.providers {
            match provider.fetch(food_name) {
                Ok(Some(record)) => {
                    tracing::info!(
                        source = provider.source().as_str(),
                        ingredients = record.ingredients.len(),
                        "Food information retrieved"
                    );
                    return record;
                }
                Ok(None) => {
                    tracing::debug!(source = provider.source().as_str(), "Food not found");
                }
                Err(e) => {
                    failures += 1;
                    tracing::warn!(
                        source = provider.source().as_str(),
                        error = %e,
                        "Food retrieval failed"
                    );
                }
            }
        }

        if !self.providers.is_empty() && failures == self.providers.len() {
            FoodRecord::unavailable(food_name)
        } else {
            FoodRecord::general(food_name)
        }
    }
}
