use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A lineup as submitted by a team, before roster rules are checked.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SelectionRequest {
    pub team_id: Uuid,
    pub race_id: Uuid,
    #[validate(length(min = 1, max = 5, message = "a lineup has between 1 and 5 drivers"))]
    pub driver_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterSummary {
    pub tier_one: Vec<Uuid>,
    pub tier_two: Vec<Uuid>,
    pub total_cost: Decimal,
}
