pub mod breakdown;
pub mod ranking;
pub mod season;
pub mod selection;
