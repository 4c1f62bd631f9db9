use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_rooms: i64,
    pub empty_rooms: i64,
    pub rented_rooms: i64,
    pub pending_bills: i64,
    pub pending_amount: f64,
    pub revenue: f64,
}
