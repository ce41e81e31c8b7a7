//! Fixed vocabularies for the text miner. All entries are lowercase.

/// Known medication names (generic and brand).
pub const KNOWN_MEDICATIONS: &[&str] = &[
    "warfarin", "coumadin", "atorvastatin", "lipitor", "simvastatin", "zocor",
    "lisinopril", "prinivil", "zestril", "metformin", "glucophage", "amlodipine",
    "norvasc", "metoprolol", "lopressor", "toprol", "losartan", "cozaar",
    "albuterol", "proventil", "ventolin", "omeprazole", "prilosec", "gabapentin",
    "neurontin", "hydrochlorothiazide", "levothyroxine", "synthroid", "amoxicillin",
    "penicillin", "aspirin", "ibuprofen", "acetaminophen", "tylenol", "advil",
    "insulin", "prednisone", "fluoxetine", "prozac", "sertraline", "zoloft",
    "furosemide", "lasix", "citalopram", "celexa", "montelukast", "singulair",
];

/// Known condition names and phrases.
pub const KNOWN_CONDITIONS: &[&str] = &[
    "diabetes", "hypertension", "high blood pressure", "high cholesterol",
    "heart disease", "asthma", "copd", "arthritis", "depression", "anxiety",
    "thyroid", "hypothyroidism", "hyperthyroidism", "gerd", "acid reflux",
    "migraine", "allergies", "gout", "kidney disease", "liver disease",
    "osteoporosis", "cancer", "epilepsy", "seizures", "parkinsons",
    "alzheimers", "celiac", "gluten", "lactose intolerance", "ibs",
    "crohns", "colitis", "fibromyalgia", "lupus", "psoriasis", "eczema",
];

/// Words captured by medication patterns that are never medication names.
pub const MEDICATION_STOP_WORDS: &[&str] = &[
    "the", "and", "with", "this", "your", "you", "for", "daily", "once",
    "twice", "day", "morning", "night",
];

/// Shortest token accepted as a medication name (in characters).
pub const MIN_MEDICATION_LEN: usize = 3;

pub fn is_medication_stop_word(token: &str) -> bool {
    MEDICATION_STOP_WORDS.contains(&token)
}
