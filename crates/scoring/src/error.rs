use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Roster violation: {0}")]
    RosterViolation(String),

    #[error("Unknown session type: {0}")]
    UnknownSession(String),

    #[error("Invalid driver tier: {0}")]
    InvalidTier(u8),

    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        ScoringError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ScoringError::NotFound { .. })
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, ScoringError::ConstraintViolation(_))
    }
}
