use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    MultipleChoice,
    MultiFieldDropdown,
}

/// The optional bonus question attached to a race.
///
/// `options` is a JSON array of strings for multiple-choice questions and a JSON
/// array of string arrays (one per field) for multi-field dropdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionQuestion {
    pub question_id: Uuid,
    pub race_id: Uuid,
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Option<serde_json::Value>,
    pub correct_answer: Option<String>,
    pub points_awarded: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionAnswer {
    pub answer_id: Uuid,
    pub team_id: Uuid,
    pub question_id: Uuid,
    pub answer: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub points_earned: Decimal,
}

impl PredictionAnswer {
    /// Points this answer contributes to a team total.
    pub fn awarded_points(&self) -> Decimal {
        if self.is_correct {
            self.points_earned
        } else {
            Decimal::ZERO
        }
    }
}
