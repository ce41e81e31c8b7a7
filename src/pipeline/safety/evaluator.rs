use crate::knowledge::KnowledgeBase;
use crate::matching::{matches, TermSet};
use crate::pipeline::food::{extract_ingredients, FoodRecord};
use crate::pipeline::restrictions::PrescriptionFindings;

use super::messages::MessageTemplates;
use super::types::{SafetyError, SafetyVerdict};

/// Decide whether `food_name` is safe given `findings`.
///
/// Runs every check (no short-circuit):
/// 1. the food name against the restrictions,
/// 2. each ingredient against each restriction,
/// 3. the food name and ingredients against foods that interact with each medication,
/// 4. the food name and ingredients against each allergy.
///
/// When the record has no ingredients but has a description, ingredients are
/// mined from the description first.
///
/// This is the component's only swallow point: an evaluation error is logged
/// and turned into [`SafetyVerdict::undetermined`], which is never safe.
pub fn evaluate(
    food_name: &str,
    food_record: &FoodRecord,
    findings: &PrescriptionFindings,
    kb: &KnowledgeBase,
) -> SafetyVerdict {
    match try_evaluate(food_name, food_record, findings, kb) {
        Ok(verdict) => {
            tracing::info!(
                is_safe = verdict.is_safe,
                offending = verdict.offending_items.len(),
                source = food_record.source.as_str(),
                "Food safety evaluated"
            );
            verdict
        }
        Err(e) => {
            tracing::error!(error = %e, "Food safety evaluation failed");
            SafetyVerdict::undetermined()
        }
    }
}

fn try_evaluate(
    food_name: &str,
    food_record: &FoodRecord,
    findings: &PrescriptionFindings,
    kb: &KnowledgeBase,
) -> Result<SafetyVerdict, SafetyError> {
    let food_name = food_name.trim();
    let ingredients = effective_ingredients(food_record);

    if food_name.is_empty() && ingredients.is_empty() {
        return Err(SafetyError::NothingToEvaluate);
    }

    let mut offending = TermSet::new();
    let mut explanations = Vec::new();

    let food_or_ingredient_matches = |term: &str| {
        matches(term, food_name) || ingredients.iter().any(|i| matches(term, i))
    };

    // 1. food name is itself a restriction
    if findings.restrictions.any_match(food_name) {
        offending.insert(food_name);
        explanations.push(MessageTemplates::direct_restriction(food_name));
    }

    // 2. ingredient × restriction
    for ingredient in &ingredients {
        for restriction in &findings.restrictions {
            if matches(ingredient, restriction) {
                offending.insert(ingredient.as_str());
                explanations.push(MessageTemplates::ingredient_restriction(ingredient));
            }
        }
    }

    // 3. medication interactions
    for medication in &findings.medications {
        for risky_food in &kb.risky_foods_for_medication(medication) {
            if food_or_ingredient_matches(risky_food) {
                offending.insert(risky_food.as_str());
                explanations.push(MessageTemplates::medication_interaction(risky_food, medication));
            }
        }
    }

    // 4. allergies
    for allergy in &findings.allergies {
        if food_or_ingredient_matches(allergy) {
            offending.insert(allergy.as_str());
            explanations.push(MessageTemplates::allergy(allergy));
        }
    }

    Ok(SafetyVerdict::from_evidence(offending, explanations))
}

/// The record's ingredients, or ingredients mined from its description
/// when the record has none.
fn effective_ingredients(food_record: &FoodRecord) -> Vec<String> {
    let listed: Vec<String> = food_record
        .ingredients
        .iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();

    if listed.is_empty() && !food_record.description.trim().is_empty() {
        return extract_ingredients(&food_record.description);
    }
    listed
}
