pub mod leaderboard;
pub mod points_table;
pub mod prediction;
pub mod roster;
pub mod season;
pub mod selection;
pub mod session;
pub mod tier;
