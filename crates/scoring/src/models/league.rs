use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct League {
    pub league_id: Uuid,
    pub name: String,
    pub season: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: Uuid,
    pub league_id: Uuid,
    pub name: String,
    pub owner: String,
}
