use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Foodsafe";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest prescription document accepted for analysis (16 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Largest extracted prescription text handed to the miner.
pub const MAX_PRESCRIPTION_BYTES: usize = 1024 * 1024;

/// File extensions accepted as prescription documents.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "txt"];

/// Public demo key accepted by FoodData Central (heavily rate limited).
pub const USDA_DEMO_API_KEY: &str = "DEMO_KEY";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "foodsafe=info,warn"
}

/// Get the application data directory
/// Platform data dir (e.g. ~/.local/share/Foodsafe), or the working directory
/// when the platform reports none.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Knowledge base override file.
/// `FOODSAFE_KNOWLEDGE_FILE` wins over `<app_data_dir>/food_knowledge.json`.
pub fn knowledge_file() -> PathBuf {
    std::env::var_os("FOODSAFE_KNOWLEDGE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| app_data_dir().join("food_knowledge.json"))
}

/// FoodData Central API key (`FOODSAFE_USDA_API_KEY`, falls back to the demo key).
pub fn usda_api_key() -> String {
    std::env::var("FOODSAFE_USDA_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| USDA_DEMO_API_KEY.to_string())
}

/// Timeout applied to every food retrieval request.
pub fn http_timeout() -> Duration {
    parse_timeout(std::env::var("FOODSAFE_HTTP_TIMEOUT_SECS").ok().as_deref())
}

fn parse_timeout(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&s| s > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
