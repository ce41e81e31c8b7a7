//! Tables compiled into the binary. Used whenever no knowledge file is configured.

/// Medication (or medication class) → foods that interact with it.
pub(super) const INTERACTIONS: &[(&str, &[&str])] = &[
    ("warfarin", &["green leafy vegetables", "cranberries", "grapefruit"]),
    ("statins", &["grapefruit", "grapefruit juice"]),
    ("antibiotics", &["dairy", "alcohol", "caffeine"]),
    ("maoi", &["aged cheese", "cured meats", "draft beer", "sauerkraut", "soy sauce"]),
    ("ace inhibitors", &["bananas", "potassium supplements", "salt substitutes"]),
    ("digoxin", &["high-fiber foods", "licorice"]),
    ("diuretics", &["licorice", "alcohol"]),
    ("thyroid medication", &["soy", "walnuts", "high-fiber foods"]),
];

/// Medical condition → foods to avoid.
pub(super) const CONDITIONS: &[(&str, &[&str])] = &[
    ("diabetes", &["sugar", "high carbs", "honey", "syrup"]),
    ("hypertension", &["salt", "sodium", "cured meats", "pickles", "canned soups"]),
    ("high cholesterol", &["saturated fats", "trans fats", "fatty meats"]),
    ("gout", &["red meat", "organ meats", "seafood", "alcohol", "high-fructose"]),
    ("kidney disease", &["phosphorus", "potassium", "sodium", "protein"]),
    ("celiac", &["gluten", "wheat", "barley", "rye"]),
    ("heart disease", &["saturated fat", "trans fat", "cholesterol", "sodium"]),
    ("ibs", &["dairy", "wheat", "citrus fruits", "beans", "cabbage"]),
];

/// Canonical food allergens.
pub(super) const ALLERGENS: &[&str] = &[
    "peanuts", "tree nuts", "milk", "eggs", "fish", "shellfish",
    "soy", "wheat", "gluten", "sesame",
];

/// Brand or generic name → interaction class in [`INTERACTIONS`].
pub(super) const MEDICATION_ALIASES: &[(&str, &str)] = &[
    ("coumadin", "warfarin"),
    ("jantoven", "warfarin"),
    ("atorvastatin", "statins"),
    ("lipitor", "statins"),
    ("simvastatin", "statins"),
    ("zocor", "statins"),
    ("rosuvastatin", "statins"),
    ("crestor", "statins"),
    ("lovastatin", "statins"),
    ("amoxicillin", "antibiotics"),
    ("penicillin", "antibiotics"),
    ("ciprofloxacin", "antibiotics"),
    ("doxycycline", "antibiotics"),
    ("tetracycline", "antibiotics"),
    ("phenelzine", "maoi"),
    ("tranylcypromine", "maoi"),
    ("selegiline", "maoi"),
    ("lisinopril", "ace inhibitors"),
    ("prinivil", "ace inhibitors"),
    ("zestril", "ace inhibitors"),
    ("enalapril", "ace inhibitors"),
    ("ramipril", "ace inhibitors"),
    ("lanoxin", "digoxin"),
    ("furosemide", "diuretics"),
    ("lasix", "diuretics"),
    ("hydrochlorothiazide", "diuretics"),
    ("spironolactone", "diuretics"),
    ("levothyroxine", "thyroid medication"),
    ("synthroid", "thyroid medication"),
];
