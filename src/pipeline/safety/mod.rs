pub mod evaluator;
pub mod messages;
pub mod types;

pub use evaluator::evaluate;
pub use messages::*;
pub use types::*;
