pub mod mining;
pub mod restrictions;
pub mod food;
pub mod safety;
pub mod intake;
pub mod analysis;
