use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A team's driver lineup for one race.
///
/// `points` is derived data: it is overwritten every time the selection is recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSelection {
    pub selection_id: Uuid,
    pub team_id: Uuid,
    pub race_id: Uuid,
    pub driver_ids: Vec<Uuid>,
    pub total_cost: Decimal,
    #[serde(default = "default_on_time")]
    pub submitted_on_time: bool,
    #[serde(default)]
    pub points: Decimal,
}

fn default_on_time() -> bool {
    true
}
