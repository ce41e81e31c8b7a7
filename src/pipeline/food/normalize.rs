//! Ingredient and description extraction from unstructured food text.

use std::sync::LazyLock;

use regex::Regex;

use crate::matching::TermSet;

/// Label templates introducing an ingredient list, tried in order.
static INGREDIENT_LABELS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:ingredients|contains):([^.]+)",
        r"(?i)(?:made from|composed of):([^.]+)",
        r"(?i)(?:ingredients include|contains):([^.]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid ingredient label regex"))
    .collect()
});

/// Scanned for when no labelled list is present.
const COMMON_INGREDIENTS: &[&str] = &[
    "salt", "sugar", "water", "flour", "rice", "wheat", "corn", "dairy",
    "milk", "eggs", "soy", "nuts", "peanuts", "fish", "shellfish",
    "gluten", "vegetable oil", "butter", "cheese",
];

const DESCRIPTION_FALLBACK_CHARS: usize = 200;

/// Candidate ingredient terms from a free-text food description.
///
/// Labelled lists ("Ingredients: a, b, c.") win; each run up to the next
/// period is split on commas, trimmed and lowercased. Without a label, any
/// common ingredient mentioned in the text is reported. Deduplicated, in
/// first-seen order, possibly empty.
pub fn extract_ingredients(description: &str) -> Vec<String> {
    let mut ingredients = TermSet::new();

    for label in INGREDIENT_LABELS.iter() {
        for caps in label.captures_iter(description) {
            let Some(run) = caps.get(1) else { continue };
            ingredients.extend(
                run.as_str()
                    .split(',')
                    .map(|item| item.trim().to_lowercase())
                    .filter(|item| !item.is_empty()),
            );
        }
    }

    if ingredients.is_empty() {
        let lower = description.to_lowercase();
        ingredients.extend(COMMON_INGREDIENTS.iter().copied().filter(|i| lower.contains(i)));
    }

    ingredients.into()
}

/// Short description from long-form text (e.g. an encyclopedia article).
///
/// Returns the first non-blank, blank-line-delimited paragraph. Text without
/// a paragraph break is cut to 200 characters with a trailing "..." when longer.
pub fn extract_description(text: &str) -> String {
    let text = text.trim();
    if let Some((first, _)) = text.split_once("\n\n") {
        return first.trim().to_string();
    }

    if text.chars().count() > DESCRIPTION_FALLBACK_CHARS {
        let truncated: String = text.chars().take(DESCRIPTION_FALLBACK_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labelled_list_stops_at_sentence_end() {
        let ingredients = extract_ingredients("Ingredients: wheat, milk, salt. Best served cold.");
        assert_eq!(ingredients, vec!["wheat", "milk", "salt"]);
    }

    #[test]
    fn contains_label_is_case_insensitive() {
        let ingredients = extract_ingredients("CONTAINS: Peanuts , Soy Lecithin.");
        assert_eq!(ingredients, vec!["peanuts", "soy lecithin"]);
    }

    #[test]
    fn made_from_label() {
        let ingredients = extract_ingredients("A spread made from: hazelnuts, cocoa, sugar.");
        assert_eq!(ingredients, vec!["hazelnuts", "cocoa", "sugar"]);
    }

    #[test]
    fn ingredients_include_label() {
        let ingredients =
            extract_ingredients("Traditional recipe. Ingredients include: rice, saffron.");
        assert_eq!(ingredients, vec!["rice", "saffron"]);
    }

    #[test]
    fn several_labels_merge_without_duplicates() {
        let ingredients =
            extract_ingredients("Ingredients: oats, honey. Contains: milk, honey.");
        assert_eq!(ingredients, vec!["oats", "honey", "milk"]);
    }

    #[test]
    fn empty_items_are_dropped() {
        let ingredients = extract_ingredients("Ingredients: corn, , salt,");
        assert_eq!(ingredients, vec!["corn", "salt"]);
    }

    #[test]
    fn vocabulary_fallback_without_label() {
        let ingredients =
            extract_ingredients("A bread baked with Wheat Flour, butter and a pinch of salt");
        assert!(ingredients.contains(&"wheat".to_string()));
        assert!(ingredients.contains(&"flour".to_string()));
        assert!(ingredients.contains(&"butter".to_string()));
        assert!(ingredients.contains(&"salt".to_string()));
        assert!(!ingredients.contains(&"milk".to_string()));
    }

    #[test]
    fn nothing_recognisable_yields_empty_list() {
        assert!(extract_ingredients("A crisp apple.").is_empty());
        assert!(extract_ingredients("").is_empty());
    }

    #[test]
    fn description_takes_first_paragraph() {
        let text = "Kimchi is a fermented side dish.\n\nIt originated in Korea.";
        assert_eq!(extract_description(text), "Kimchi is a fermented side dish.");
    }

    #[test]
    fn description_truncates_long_single_paragraph() {
        let text = "x".repeat(250);
        let description = extract_description(&text);
        assert_eq!(description.chars().count(), 203);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn description_skips_leading_blank_paragraph() {
        let text = "\n\nMiso is a fermented paste.\n\nIt is made from soybeans.";
        assert_eq!(extract_description(text), "Miso is a fermented paste.");
    }

    #[test]
    fn description_of_whitespace_only_text_is_empty() {
        assert_eq!(extract_description(" \n\n "), "");
    }

    #[test]
    fn description_keeps_short_text() {
        assert_eq!(extract_description("  Plain yogurt.  "), "Plain yogurt.");
    }

    #[test]
    fn description_truncation_respects_char_boundaries() {
        let text = "é".repeat(300);
        let description = extract_description(&text);
        assert!(description.starts_with("éé"));
        assert_eq!(description.chars().count(), 203);
    }
}
