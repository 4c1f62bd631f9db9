use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "service_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    #[default]
    Meter,
    Fixed,
}

// Catalog entry only; bill totals do not read these.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct ServiceItem {
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    pub price: f64,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
}
