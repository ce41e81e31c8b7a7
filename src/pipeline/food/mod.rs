pub mod normalize;
pub mod sources;

pub use normalize::{extract_description, extract_ingredients};
pub use sources::*;

use serde::{Deserialize, Serialize};

/// Which external source produced a [`FoodRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodSource {
    UsdaFoodDataCentral,
    Wikipedia,
    /// Generic placeholder when no source knew the food.
    General,
    /// Placeholder after retrieval itself failed.
    Default,
}

impl FoodSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsdaFoodDataCentral => "USDA Food Data Central",
            Self::Wikipedia => "Wikipedia",
            Self::General => "general",
            Self::Default => "default",
        }
    }
}

/// Loosely structured information about a food product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    /// May be empty when the source only had prose.
    pub ingredients: Vec<String>,
    pub description: String,
    pub source: FoodSource,
}

impl FoodRecord {
    /// Record for a food no source could describe.
    pub fn general(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ingredients: Vec::new(),
            description: format!(
                "Basic information for {name}. This food product may contain various ingredients."
            ),
            source: FoodSource::General,
        }
    }

    /// Record used when retrieval failed outright.
    pub fn unavailable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ingredients: Vec::new(),
            description: format!("Basic information for {name}. Detailed data unavailable."),
            source: FoodSource::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_record_has_no_ingredients() {
        let record = FoodRecord::general("oat milk");
        assert!(record.ingredients.is_empty());
        assert_eq!(record.source, FoodSource::General);
        assert!(record.description.contains("oat milk"));
    }

    #[test]
    fn source_serializes_snake_case() {
        let json = serde_json::to_string(&FoodSource::UsdaFoodDataCentral).unwrap();
        assert_eq!(json, "\"usda_food_data_central\"");
    }

    #[test]
    fn source_labels() {
        assert_eq!(FoodSource::Wikipedia.as_str(), "Wikipedia");
        assert_eq!(FoodSource::Default.as_str(), "default");
    }
}
