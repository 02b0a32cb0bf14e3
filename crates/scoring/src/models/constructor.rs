use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constructor {
    pub constructor_id: Uuid,
    pub name: String,
    /// Current championship position, if the feed has published one.
    pub standing: Option<i32>,
}

/// A constructor's championship position as it stood after `race_id`.
///
/// Only consulted when scoring the round that follows `race_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalConstructorStanding {
    pub race_id: Uuid,
    pub constructor_id: Uuid,
    pub standing: i32,
}
