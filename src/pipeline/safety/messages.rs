/// Fixed explanation and recommendation sentences for safety verdicts.
pub struct MessageTemplates;

/// Recommendation when no check fired.
pub const SAFE_RECOMMENDATION: &str = "This food appears to be safe for you to consume.";

/// Recommendation when at least one check fired.
pub const UNSAFE_RECOMMENDATION: &str =
    "This food may not be safe for you based on your prescription.";

/// Recommendation when the evaluation itself could not be completed.
pub const UNDETERMINED_RECOMMENDATION: &str =
    "Could not determine if this food is safe. Please consult with your doctor or pharmacist.";

/// Explanation paired with [`UNDETERMINED_RECOMMENDATION`].
pub const UNDETERMINED_EXPLANATION: &str =
    "An error occurred during analysis. Please try again or consult a healthcare professional.";

impl MessageTemplates {
    /// Food name itself is a restriction.
    pub fn direct_restriction(food_name: &str) -> String {
        format!("{food_name} is directly listed in your restrictions.")
    }

    /// An ingredient matches a restriction.
    pub fn ingredient_restriction(ingredient: &str) -> String {
        format!("{ingredient} may interact with your health condition or medication.")
    }

    /// A food known to interact with one of the patient's medications.
    pub fn medication_interaction(risky_food: &str, medication: &str) -> String {
        format!("{risky_food} may interact with your medication {medication}.")
    }

    /// A declared allergen is present.
    pub fn allergy(allergen: &str) -> String {
        format!("{allergen} is listed in your allergies.")
    }

    pub fn recommendation(is_safe: bool) -> &'static str {
        if is_safe {
            SAFE_RECOMMENDATION
        } else {
            UNSAFE_RECOMMENDATION
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medication_interaction_names_both() {
        let msg = MessageTemplates::medication_interaction("grapefruit", "statins");
        assert_eq!(msg, "grapefruit may interact with your medication statins.");
    }

    #[test]
    fn recommendation_by_flag() {
        assert_eq!(MessageTemplates::recommendation(true), SAFE_RECOMMENDATION);
        assert_eq!(MessageTemplates::recommendation(false), UNSAFE_RECOMMENDATION);
    }

    #[test]
    fn undetermined_recommendation_points_to_professional() {
        assert!(UNDETERMINED_RECOMMENDATION.contains("doctor or pharmacist"));
    }
}
