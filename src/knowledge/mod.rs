//! Static food-safety knowledge: medication interactions, condition-based
//! avoidance, and the canonical allergen list.
//!
//! Built once per process and never mutated. Lookups use the shared
//! [`matches`] rule, so a key matches a name when either contains the other.

mod builtin;

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::matching::{matches, TermSet};

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge file load failed ({0}): {1}")]
    Load(String, String),

    #[error("Knowledge file parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Knowledge table '{0}' is empty")]
    EmptyTable(&'static str),
}

/// A key (medication class or condition) and the foods tied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRule {
    pub key: String,
    pub foods: Vec<String>,
}

/// Brand/generic medication name resolved to an interaction class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationAlias {
    pub name: String,
    pub class: String,
}

/// Food-safety reference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    interactions: Vec<FoodRule>,
    conditions: Vec<FoodRule>,
    allergens: Vec<String>,
    #[serde(default)]
    medication_aliases: Vec<MedicationAlias>,
}

static SHARED: OnceLock<KnowledgeBase> = OnceLock::new();

impl KnowledgeBase {
    /// The tables compiled into the crate.
    pub fn builtin() -> Self {
        fn rules(table: &[(&str, &[&str])]) -> Vec<FoodRule> {
            table
                .iter()
                .map(|(key, foods)| FoodRule {
                    key: (*key).to_string(),
                    foods: foods.iter().map(|f| (*f).to_string()).collect(),
                })
                .collect()
        }

        Self {
            interactions: rules(builtin::INTERACTIONS),
            conditions: rules(builtin::CONDITIONS),
            allergens: builtin::ALLERGENS.iter().map(|a| (*a).to_string()).collect(),
            medication_aliases: builtin::MEDICATION_ALIASES
                .iter()
                .map(|(name, class)| MedicationAlias {
                    name: (*name).to_string(),
                    class: (*class).to_string(),
                })
                .collect(),
        }
    }

    /// Load tables from a JSON file with the same shape as the serialized struct.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| KnowledgeError::Load(path.display().to_string(), e.to_string()))?;
        let kb: KnowledgeBase = serde_json::from_str(&json)
            .map_err(|e| KnowledgeError::Parse(path.display().to_string(), e.to_string()))?;
        kb.validate()?;
        Ok(kb)
    }

    /// Process-wide instance.
    ///
    /// First call loads [`config::knowledge_file`] if it exists, otherwise (or on
    /// any load error) the built-in tables.
    pub fn shared() -> &'static KnowledgeBase {
        SHARED.get_or_init(|| {
            let path = config::knowledge_file();
            if !path.exists() {
                tracing::debug!(path = %path.display(), "No knowledge file, using built-in tables");
                return Self::builtin();
            }
            match Self::load(&path) {
                Ok(kb) => {
                    tracing::info!(
                        path = %path.display(),
                        interactions = kb.interactions.len(),
                        conditions = kb.conditions.len(),
                        allergens = kb.allergens.len(),
                        "Knowledge base loaded"
                    );
                    kb
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Knowledge file rejected, using built-in tables");
                    Self::builtin()
                }
            }
        })
    }

    fn validate(&self) -> Result<(), KnowledgeError> {
        if self.interactions.is_empty() {
            return Err(KnowledgeError::EmptyTable("interactions"));
        }
        if self.conditions.is_empty() {
            return Err(KnowledgeError::EmptyTable("conditions"));
        }
        if self.allergens.is_empty() {
            return Err(KnowledgeError::EmptyTable("allergens"));
        }
        Ok(())
    }

    /// Foods that may interact with `medication`: the union over every
    /// interaction key matching the name, plus the foods of every class whose
    /// brand or generic alias matches it.
    pub fn risky_foods_for_medication(&self, medication: &str) -> TermSet {
        let mut foods = collect_matching(&self.interactions, medication);
        for class in &self.resolve_classes(medication) {
            foods.union(&collect_matching(&self.interactions, class));
        }
        foods
    }

    /// Foods to avoid with `condition`: the union over every matching key.
    pub fn avoided_foods_for_condition(&self, condition: &str) -> TermSet {
        collect_matching(&self.conditions, condition)
    }

    /// Canonical allergens, in table order.
    pub fn allergens(&self) -> &[String] {
        &self.allergens
    }

    /// Interaction classes of every alias that [`matches`] `medication`,
    /// in table order.
    pub fn resolve_classes(&self, medication: &str) -> TermSet {
        self.medication_aliases
            .iter()
            .filter(|a| matches(&a.name, medication))
            .map(|a| a.class.as_str())
            .collect()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

fn collect_matching(rules: &[FoodRule], name: &str) -> TermSet {
    let mut foods = TermSet::new();
    for rule in rules.iter().filter(|r| matches(&r.key, name)) {
        foods.extend(rule.foods.iter().cloned());
    }
    foods
}
