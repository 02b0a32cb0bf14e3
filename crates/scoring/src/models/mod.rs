mod constructor;
mod driver;
mod league;
mod prediction;
mod race;
mod race_result;
mod selection;

pub use constructor::{Constructor, HistoricalConstructorStanding};
pub use driver::{Driver, Tier};
pub use league::{League, Team};
pub use prediction::{PredictionAnswer, PredictionQuestion, QuestionType};
pub use race::{Race, RaceTemplate};
pub use race_result::{RaceResult, SessionType};
pub use selection::TeamSelection;
