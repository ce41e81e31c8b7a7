pub mod config;
pub mod knowledge;
pub mod matching;
pub mod pipeline;

pub use knowledge::KnowledgeBase;
pub use matching::{matches, TermSet};
pub use pipeline::analysis::{AnalysisError, AnalysisReport, FoodSafetyAnalyzer};
pub use pipeline::food::{FoodCatalog, FoodRecord, FoodSource};
pub use pipeline::mining::TextMiner;
pub use pipeline::restrictions::{analyze_prescription, PrescriptionFindings};
pub use pipeline::safety::{evaluate, SafetyVerdict};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over [`config::default_log_filter`]. Safe to call more
/// than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
