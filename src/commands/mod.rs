pub mod analyze;
pub mod roster;
