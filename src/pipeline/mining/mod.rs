//! Rule-based extraction of medications, conditions and allergies from
//! prescription text.
//!
//! Each extractor is the union of vocabulary hits and pattern captures from
//! the rule table in [`rules`]. Precision is traded for simplicity: this is a
//! keyword heuristic, not clinical entity recognition.

pub mod rules;
pub mod vocab;

use std::sync::LazyLock;

use thiserror::Error;

use crate::knowledge::KnowledgeBase;
use crate::matching::TermSet;

pub use rules::{CaptureArity, FindingRole, PatternRule, DEFAULT_RULES};

use rules::{compile_rules, CompiledRule, ALLERGY_CUE, COMPILED_DEFAULT_RULES};
use vocab::{is_medication_stop_word, KNOWN_CONDITIONS, KNOWN_MEDICATIONS, MIN_MEDICATION_LEN};

#[derive(Error, Debug)]
pub enum MiningError {
    #[error("Mining pattern '{pattern}' failed to compile: {reason}")]
    PatternCompilation { pattern: String, reason: String },

    #[error("Mining pattern '{0}' has no capture group")]
    MissingCaptureGroup(String),
}

static DEFAULT_MINER: LazyLock<TextMiner> = LazyLock::new(TextMiner::new);

/// Pattern-driven miner over a compiled rule table.
///
/// Extraction never fails: empty or unrecognised text yields empty sets.
#[derive(Debug, Clone)]
pub struct TextMiner {
    rules: Vec<CompiledRule>,
}

impl TextMiner {
    /// Miner with the built-in rule table.
    pub fn new() -> Self {
        Self {
            rules: COMPILED_DEFAULT_RULES.clone(),
        }
    }

    /// Miner with a custom rule table, e.g. [`DEFAULT_RULES`] plus extra entries.
    pub fn with_rules(rules: &[PatternRule]) -> Result<Self, MiningError> {
        Ok(Self {
            rules: compile_rules(rules)?,
        })
    }

    pub fn extract_medications(&self, text: &str) -> TermSet {
        let text = text.to_lowercase();
        let mut candidates: Vec<String> = KNOWN_MEDICATIONS
            .iter()
            .filter(|med| text.contains(*med))
            .map(|med| (*med).to_string())
            .collect();
        candidates.extend(self.captures(FindingRole::Medication, &text));

        candidates
            .into_iter()
            .filter(|token| {
                token.chars().count() >= MIN_MEDICATION_LEN && !is_medication_stop_word(token)
            })
            .collect()
    }

    pub fn extract_conditions(&self, text: &str) -> TermSet {
        let text = text.to_lowercase();
        let mut conditions: TermSet = KNOWN_CONDITIONS
            .iter()
            .filter(|cond| text.contains(*cond))
            .copied()
            .collect();
        conditions.extend(self.captures(FindingRole::Condition, &text));
        conditions
    }

    /// Allergens from the knowledge base vocabulary declared after an
    /// "allergic to" cue, plus free-form captures for anything outside it.
    pub fn extract_allergies(&self, text: &str, kb: &KnowledgeBase) -> TermSet {
        let text = text.to_lowercase();
        let cue_ends: Vec<usize> = ALLERGY_CUE.find_iter(&text).map(|m| m.end()).collect();

        let mut allergies = TermSet::new();
        for allergen in kb.allergens() {
            let allergen = allergen.to_lowercase();
            let after_cue = cue_ends.iter().any(|&end| text[end..].starts_with(&allergen));
            if after_cue || text.contains(&format!("allergic to {allergen}")) {
                allergies.insert(allergen);
            }
        }
        allergies.extend(self.captures(FindingRole::Allergy, &text));
        allergies
    }

    fn captures(&self, role: FindingRole, text: &str) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.role == role)
            .flat_map(|rule| rule.captures(text))
            .collect()
    }
}

impl Default for TextMiner {
    fn default() -> Self {
        Self::new()
    }
}

/// [`TextMiner::extract_medications`] with the built-in rules.
pub fn extract_medications(text: &str) -> TermSet {
    DEFAULT_MINER.extract_medications(text)
}

/// [`TextMiner::extract_conditions`] with the built-in rules.
pub fn extract_conditions(text: &str) -> TermSet {
    DEFAULT_MINER.extract_conditions(text)
}

/// [`TextMiner::extract_allergies`] with the built-in rules.
pub fn extract_allergies(text: &str, kb: &KnowledgeBase) -> TermSet {
    DEFAULT_MINER.extract_allergies(text, kb)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =================================================================
    // MEDICATIONS
    // =================================================================

    #[test]
    fn medications_from_prescribed_sentence() {
        let meds = extract_medications("The patient was prescribed metformin 500 mg daily");
        assert!(meds.contains("metformin"));
        assert!(!meds.contains("daily"));
        assert!(!meds.contains("the"));
        assert_eq!(meds.len(), 1);
    }

    #[test]
    fn medications_vocabulary_hit_is_case_insensitive() {
        let meds = extract_medications("Rx: WARFARIN as directed");
        assert!(meds.contains("warfarin"));
    }

    #[test]
    fn medications_from_take_pattern() {
        let meds = extract_medications("Take ondansetron as needed for nausea");
        assert!(meds.contains("ondansetron"));
    }

    #[test]
    fn medications_drop_short_tokens_and_stop_words() {
        let meds = extract_medications("take it with food. take your pills. take daily");
        assert!(meds.is_empty(), "unexpected: {:?}", meds);
    }

    #[test]
    fn medications_collapse_duplicates() {
        let meds = extract_medications("Prescribed lisinopril. Take lisinopril 10 mg once daily.");
        assert_eq!(meds.iter().filter(|m| *m == "lisinopril").count(), 1);
    }

    #[test]
    fn medications_unknown_name_via_dosage() {
        let meds = extract_medications("Sitagliptin 100 mg every morning");
        assert!(meds.contains("sitagliptin"));
    }

    // =================================================================
    // CONDITIONS
    // =================================================================

    #[test]
    fn conditions_diagnosed_with_type_2_diabetes() {
        let conditions = extract_conditions("diagnosed with type 2 diabetes");
        assert!(conditions.contains("diabetes"));
        assert!(conditions.contains("type 2"));
    }

    #[test]
    fn conditions_vocabulary_phrase() {
        let conditions = extract_conditions("History of High Blood Pressure.");
        assert!(conditions.contains("high blood pressure"));
    }

    #[test]
    fn conditions_from_treat_pattern() {
        let conditions = extract_conditions("Medication used for treating acid reflux");
        assert!(conditions.contains("acid reflux"));
    }

    #[test]
    fn conditions_no_match() {
        assert!(extract_conditions("Routine checkup, all clear").is_empty());
    }

    // =================================================================
    // ALLERGIES
    // =================================================================

    #[test]
    fn allergies_peanuts_and_shellfish() {
        let kb = KnowledgeBase::builtin();
        let allergies = extract_allergies("I am allergic to peanuts and shellfish", &kb);
        assert!(allergies.contains("peanuts"));
        assert!(allergies.contains("shellfish"));
        assert!(!allergies.contains("peanuts and"));
        assert_eq!(allergies.as_slice(), &["peanuts", "shellfish"]);
    }

    #[test]
    fn allergies_vocabulary_after_allergy_noun() {
        let kb = KnowledgeBase::builtin();
        let allergies = extract_allergies("Known allergy to tree nuts.", &kb);
        assert!(allergies.contains("tree nuts"));
    }

    #[test]
    fn allergies_free_form_outside_vocabulary() {
        let kb = KnowledgeBase::builtin();
        let allergies = extract_allergies("Patient is allergic to strawberries.", &kb);
        assert!(allergies.contains("strawberries"));
    }

    #[test]
    fn allergies_two_word_free_form_capture() {
        let kb = KnowledgeBase::builtin();
        let allergies = extract_allergies("allergic to sulfa drugs", &kb);
        assert!(allergies.contains("sulfa drugs"));
    }

    #[test]
    fn allergies_require_cue() {
        let kb = KnowledgeBase::builtin();
        let allergies = extract_allergies("Eat fish twice a week.", &kb);
        assert!(allergies.is_empty());
    }

    #[test]
    fn allergies_use_knowledge_base_vocabulary() {
        let json = r#"{
            "interactions": [{"key": "warfarin", "foods": ["kale"]}],
            "conditions": [{"key": "gout", "foods": ["anchovies"]}],
            "allergens": ["lupin"]
        }"#;
        let kb: KnowledgeBase = serde_json::from_str(json).unwrap();
        let allergies = extract_allergies("Severe allergy to lupin flour", &kb);
        assert!(allergies.contains("lupin"));
    }

    // =================================================================
    // EMPTY INPUT & CUSTOM RULES
    // =================================================================

    #[test]
    fn empty_text_yields_empty_sets() {
        let kb = KnowledgeBase::builtin();
        assert!(extract_medications("").is_empty());
        assert!(extract_conditions("").is_empty());
        assert!(extract_allergies("", &kb).is_empty());
    }

    #[test]
    fn custom_rule_table_extends_defaults() {
        let mut rules = DEFAULT_RULES.to_vec();
        rules.push(PatternRule {
            pattern: r"history\s+of\s+(\w+)",
            role: FindingRole::Condition,
            arity: CaptureArity::Single,
            description: "history of <condition>",
        });
        let miner = TextMiner::with_rules(&rules).unwrap();
        let conditions = miner.extract_conditions("History of shingles");
        assert!(conditions.contains("shingles"));
    }

    #[test]
    fn custom_rule_table_rejects_invalid_pattern() {
        let rules = [PatternRule {
            pattern: r"(unclosed",
            role: FindingRole::Condition,
            arity: CaptureArity::Single,
            description: "broken",
        }];
        assert!(TextMiner::with_rules(&rules).is_err());
    }
}
