use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::MiningError;

/// Which kind of finding a pattern produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingRole {
    Medication,
    Condition,
    Allergy,
}

/// Shape of capture group 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureArity {
    /// Exactly one token.
    Single,
    /// One token, optionally followed by a second.
    OneOrTwo,
    /// A clause listing several items ("peanuts, eggs and shellfish").
    /// Each item of one or two words is kept.
    List,
}

/// One entry of the miner's pattern table.
///
/// Patterns run against case-folded text, so they are written in lowercase.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub pattern: &'static str,
    pub role: FindingRole,
    pub arity: CaptureArity,
    pub description: &'static str,
}

/// Built-in extraction rules, applied in order.
pub const DEFAULT_RULES: &[PatternRule] = &[
    PatternRule {
        pattern: r"prescri\w+\s+(\w+)",
        role: FindingRole::Medication,
        arity: CaptureArity::Single,
        description: "prescribed <name>",
    },
    PatternRule {
        pattern: r"take\s+(\w+)",
        role: FindingRole::Medication,
        arity: CaptureArity::Single,
        description: "take <name>",
    },
    PatternRule {
        pattern: r"(\w+)\s+\d+\s*mg",
        role: FindingRole::Medication,
        arity: CaptureArity::Single,
        description: "<name> <dose> mg",
    },
    PatternRule {
        pattern: r"diagnos\w+\s+with\s+(\w+(?:\s+\w+)?)",
        role: FindingRole::Condition,
        arity: CaptureArity::OneOrTwo,
        description: "diagnosed with <condition>",
    },
    PatternRule {
        pattern: r"treat\w+\s+(\w+(?:\s+\w+)?)",
        role: FindingRole::Condition,
        arity: CaptureArity::OneOrTwo,
        description: "treating <condition>",
    },
    PatternRule {
        pattern: r"allerg\w+\s+to\s+(\w+(?:\s+\w+)?)",
        role: FindingRole::Allergy,
        arity: CaptureArity::OneOrTwo,
        description: "allergic to <allergen>",
    },
    PatternRule {
        pattern: r"allerg\w+\s+to\s+([^.;:!?\n]+)",
        role: FindingRole::Allergy,
        arity: CaptureArity::List,
        description: "allergic to <allergen>, <allergen> and <allergen>",
    },
];

/// Cue preceding a declared allergen, used for vocabulary detection.
pub(super) static ALLERGY_CUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"allerg\w+\s+to\s+").expect("Invalid allergy cue regex"));

const LIST_CONNECTORS: &[&str] = &["and", "or"];

/// Separators inside an allergen list.
static LIST_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(?:,|&|/|\band\b|\bor\b)\s*").expect("Invalid list separator regex")
});

pub(super) static COMPILED_DEFAULT_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    compile_rules(DEFAULT_RULES).expect("Invalid built-in mining rule")
});

/// A rule with its regex compiled.
#[derive(Debug, Clone)]
pub(super) struct CompiledRule {
    regex: Regex,
    pub(super) role: FindingRole,
    arity: CaptureArity,
}

impl CompiledRule {
    /// Every term this rule captures in `text`, shaped by its arity.
    pub(super) fn captures(&self, text: &str) -> Vec<String> {
        let mut terms = Vec::new();
        for caps in self.regex.captures_iter(text) {
            let Some(group) = caps.get(1) else { continue };
            let captured = group.as_str().trim();
            match self.arity {
                CaptureArity::Single => {
                    if word_count(captured) == 1 {
                        terms.push(captured.to_string());
                    }
                }
                CaptureArity::OneOrTwo => {
                    if (1..=2).contains(&word_count(captured)) {
                        terms.push(strip_trailing_connector(captured).to_string());
                    }
                }
                CaptureArity::List => terms.extend(split_list(captured)),
            }
        }
        terms
    }
}

pub(super) fn compile_rules(rules: &[PatternRule]) -> Result<Vec<CompiledRule>, MiningError> {
    rules
        .iter()
        .map(|rule| {
            let regex = Regex::new(rule.pattern).map_err(|e| MiningError::PatternCompilation {
                pattern: rule.pattern.to_string(),
                reason: e.to_string(),
            })?;
            // captures_len counts the implicit whole-match group
            if regex.captures_len() < 2 {
                return Err(MiningError::MissingCaptureGroup(rule.pattern.to_string()));
            }
            Ok(CompiledRule {
                regex,
                role: rule.role,
                arity: rule.arity,
            })
        })
        .collect()
}

/// "peanuts and" → "peanuts". A two-word capture ending in a list
/// connector only holds the first item of a list.
fn strip_trailing_connector(captured: &str) -> &str {
    match captured.rsplit_once(char::is_whitespace) {
        Some((head, last)) if LIST_CONNECTORS.contains(&last) => head.trim_end(),
        _ => captured,
    }
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Split "peanuts, tree nuts and shellfish" into its items.
/// Items longer than two words or shorter than three characters are dropped.
fn split_list(clause: &str) -> Vec<String> {
    LIST_SEPARATOR
        .split(clause)
        .map(|item| item.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|item| (1..=2).contains(&word_count(item)) && item.chars().count() >= 3)
        .collect()
}
