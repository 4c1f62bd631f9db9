use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "contract_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Active,
    Expired,
    Terminated,
}

/// A lease binding one tenant to one room. Both references are weak: deleting
/// the room or the tenant leaves the contract in place.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Contract {
    pub id: Uuid,
    pub room_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rental_price: f64,
    pub deposit_amount: f64,
    pub number_of_tenants: i32,
    pub status: ContractStatus,
    pub service_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}
