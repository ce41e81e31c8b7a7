//! Restriction aggregation: turns mined findings into the set of food terms
//! a patient should avoid.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::knowledge::KnowledgeBase;
use crate::matching::TermSet;
use crate::pipeline::mining::TextMiner;

#[derive(Error, Debug)]
pub enum RestrictionError {
    #[error("Prescription text too large: {len} bytes (max {max})")]
    InputTooLarge { len: usize, max: usize },
}

/// Everything inferred from one prescription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionFindings {
    pub medications: TermSet,
    pub conditions: TermSet,
    pub allergies: TermSet,
    /// Union of medication-derived foods, condition-derived foods and allergies.
    pub restrictions: TermSet,
}

impl PrescriptionFindings {
    pub fn is_empty(&self) -> bool {
        self.medications.is_empty()
            && self.conditions.is_empty()
            && self.allergies.is_empty()
            && self.restrictions.is_empty()
    }
}

/// Combine findings with knowledge base lookups.
///
/// Restrictions are, in order: foods risky with each medication, foods to
/// avoid for each condition, then the allergies verbatim.
pub fn aggregate(
    medications: &TermSet,
    conditions: &TermSet,
    allergies: &TermSet,
    kb: &KnowledgeBase,
) -> PrescriptionFindings {
    let mut restrictions = TermSet::new();
    for medication in medications {
        restrictions.union(&kb.risky_foods_for_medication(medication));
    }
    for condition in conditions {
        restrictions.union(&kb.avoided_foods_for_condition(condition));
    }
    restrictions.union(allergies);

    PrescriptionFindings {
        medications: medications.clone(),
        conditions: conditions.clone(),
        allergies: allergies.clone(),
        restrictions,
    }
}

/// Mine `text` and aggregate the result.
///
/// This is the only place the component absorbs failures: any error is
/// logged and replaced by empty findings. Empty text is not an error.
pub fn analyze_prescription(
    text: &str,
    miner: &TextMiner,
    kb: &KnowledgeBase,
) -> PrescriptionFindings {
    match try_analyze(text, miner, kb) {
        Ok(findings) => {
            tracing::info!(
                medications = findings.medications.len(),
                conditions = findings.conditions.len(),
                allergies = findings.allergies.len(),
                restrictions = findings.restrictions.len(),
                "Prescription analyzed"
            );
            findings
        }
        Err(e) => {
            tracing::error!(error = %e, "Prescription analysis failed, returning empty findings");
            PrescriptionFindings::default()
        }
    }
}

fn try_analyze(
    text: &str,
    miner: &TextMiner,
    kb: &KnowledgeBase,
) -> Result<PrescriptionFindings, RestrictionError> {
    if text.len() > config::MAX_PRESCRIPTION_BYTES {
        return Err(RestrictionError::InputTooLarge {
            len: text.len(),
            max: config::MAX_PRESCRIPTION_BYTES,
        });
    }

    let medications = miner.extract_medications(text);
    let conditions = miner.extract_conditions(text);
    let allergies = miner.extract_allergies(text, kb);
    Ok(aggregate(&medications, &conditions, &allergies, kb))
}
