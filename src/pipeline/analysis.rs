//! Food safety analysis orchestrator.
//!
//! Single entry point that drives the whole flow:
//! document → text → findings → food record → verdict.
//!
//! Text extraction and food retrieval are injected (`DocumentTextSource`,
//! `FoodCatalog`) so the orchestrator stays testable without OCR or network.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::knowledge::KnowledgeBase;
use crate::pipeline::food::{FoodCatalog, FoodRecord};
use crate::pipeline::intake::{
    detect_kind, is_allowed_file, read_document, sanitize_text, DocumentTextSource, IntakeError,
};
use crate::pipeline::mining::TextMiner;
use crate::pipeline::restrictions::{analyze_prescription, PrescriptionFindings};
use crate::pipeline::safety::{evaluate, SafetyVerdict};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Intake failed: {0}")]
    Intake(#[from] IntakeError),

    #[error("File type not allowed: {0}")]
    FileNotAllowed(String),

    #[error("Unsupported document format")]
    UnsupportedFormat,

    #[error("No text could be extracted from the prescription")]
    NoTextExtracted,

    #[error("Prescription text too large: {len} bytes (max {max})")]
    PrescriptionTooLarge { len: usize, max: usize },

    #[error("Food name is empty")]
    EmptyFoodName,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Everything a front end needs to render one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub food_name: String,
    pub food: FoodRecord,
    pub findings: PrescriptionFindings,
    pub verdict: SafetyVerdict,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct FoodSafetyAnalyzer {
    miner: TextMiner,
    kb: &'static KnowledgeBase,
}

impl FoodSafetyAnalyzer {
    pub fn new(miner: TextMiner, kb: &'static KnowledgeBase) -> Self {
        Self { miner, kb }
    }

    /// Default miner over the process-wide knowledge base.
    pub fn shared() -> Self {
        Self::new(TextMiner::new(), KnowledgeBase::shared())
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.kb
    }

    /// Run the pipeline on prescription text and an already retrieved food record.
    ///
    /// Never fails: the aggregator and evaluator absorb their own errors.
    /// Text over `config::MAX_PRESCRIPTION_BYTES` cannot be mined, so its
    /// verdict is undetermined rather than judged against empty findings.
    pub fn analyze_text(&self, prescription_text: &str, food: FoodRecord) -> AnalysisReport {
        let (findings, verdict) = if prescription_text.len() > config::MAX_PRESCRIPTION_BYTES {
            tracing::warn!(
                text_length = prescription_text.len(),
                max = config::MAX_PRESCRIPTION_BYTES,
                "Prescription too large to analyze"
            );
            (PrescriptionFindings::default(), SafetyVerdict::undetermined())
        } else {
            let findings = analyze_prescription(prescription_text, &self.miner, self.kb);
            let verdict = evaluate(&food.name, &food, &findings, self.kb);
            (findings, verdict)
        };
        AnalysisReport {
            id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            food_name: food.name.clone(),
            food,
            findings,
            verdict,
        }
    }

    /// Full pipeline from an uploaded prescription document.
    ///
    /// 1. Detect the document kind from its bytes
    /// 2. Extract and sanitize the text, refusing empty or oversized results
    /// 3. Retrieve the food record
    /// 4. Mine, aggregate and evaluate
    pub fn analyze_document(
        &self,
        bytes: &[u8],
        food_name: &str,
        source: &dyn DocumentTextSource,
        catalog: &FoodCatalog,
    ) -> Result<AnalysisReport, AnalysisError> {
        let food_name = food_name.trim();
        if food_name.is_empty() {
            return Err(AnalysisError::EmptyFoodName);
        }

        let kind = detect_kind(bytes);
        if !kind.is_supported() {
            return Err(AnalysisError::UnsupportedFormat);
        }

        let text = sanitize_text(&source.extract_text(bytes, kind)?);
        if text.is_empty() {
            tracing::warn!(kind = kind.as_str(), "Prescription yielded no text");
            return Err(AnalysisError::NoTextExtracted);
        }
        if text.len() > config::MAX_PRESCRIPTION_BYTES {
            return Err(AnalysisError::PrescriptionTooLarge {
                len: text.len(),
                max: config::MAX_PRESCRIPTION_BYTES,
            });
        }
        tracing::info!(
            kind = kind.as_str(),
            text_length = text.len(),
            "Prescription text extracted"
        );

        let mut food = catalog.lookup(food_name);
        // Reports carry the name the user asked about, not the source's label.
        food.name = food_name.to_string();

        Ok(self.analyze_text(&text, food))
    }

    /// [`analyze_document`](Self::analyze_document) on a file, after the
    /// upload extension filter and size limit.
    pub fn analyze_file(
        &self,
        path: &Path,
        food_name: &str,
        source: &dyn DocumentTextSource,
        catalog: &FoodCatalog,
    ) -> Result<AnalysisReport, AnalysisError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if !is_allowed_file(file_name) {
            return Err(AnalysisError::FileNotAllowed(file_name.to_string()));
        }

        let bytes = read_document(path)?;
        self.analyze_document(&bytes, food_name, source, catalog)
    }
}

impl Default for FoodSafetyAnalyzer {
    fn default() -> Self {
        Self::shared()
    }
}
