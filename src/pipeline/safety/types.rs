use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::messages::{
    MessageTemplates, UNDETERMINED_EXPLANATION, UNDETERMINED_RECOMMENDATION,
};
use crate::matching::TermSet;

/// Outcome of evaluating one food against one set of findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    pub is_safe: bool,
    /// Food names, ingredients, risky foods or allergens that triggered a check.
    pub offending_items: TermSet,
    /// One sentence per triggered check, in check order, without duplicates.
    pub explanations: Vec<String>,
    /// Fixed sentence chosen by `is_safe`.
    pub recommendation: String,
}

impl SafetyVerdict {
    /// Build a verdict from collected evidence. Safe iff nothing offended.
    pub fn from_evidence(offending_items: TermSet, explanations: Vec<String>) -> Self {
        let is_safe = offending_items.is_empty();
        let mut seen = TermSet::new();
        let explanations = explanations
            .into_iter()
            .filter(|e| seen.insert(e.clone()))
            .collect();
        Self {
            is_safe,
            offending_items,
            explanations,
            recommendation: MessageTemplates::recommendation(is_safe).to_string(),
        }
    }

    /// Verdict used when evaluation could not complete. Never reports safe.
    pub fn undetermined() -> Self {
        Self {
            is_safe: false,
            offending_items: TermSet::new(),
            explanations: vec![UNDETERMINED_EXPLANATION.to_string()],
            recommendation: UNDETERMINED_RECOMMENDATION.to_string(),
        }
    }
}

/// Safety evaluation errors. Absorbed by `evaluate`; never reach callers.
#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("No food name, ingredients or description to evaluate")]
    NothingToEvaluate,
}
