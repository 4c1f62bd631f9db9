use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::billmodel::{Bill, BillWithRefs};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateBillDto {
    #[serde(alias = "tenantId")]
    pub tenant_id: Uuid,

    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: i32,

    #[validate(range(min = 2000, max = 2100, message = "Year must be between 2000 and 2100"))]
    pub year: i32,

    #[validate(range(min = 0.0, message = "Meter readings cannot be negative"))]
    pub elec_old: f64,
    #[validate(range(min = 0.0, message = "Meter readings cannot be negative"))]
    pub elec_new: f64,
    // None and 0 both fall back to the configured default
    pub elec_price: Option<f64>,

    #[validate(range(min = 0.0, message = "Meter readings cannot be negative"))]
    pub water_old: f64,
    #[validate(range(min = 0.0, message = "Meter readings cannot be negative"))]
    pub water_new: f64,
    pub water_price: Option<f64>,

    pub service_fee: Option<f64>,
    pub other_fee: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBillStatusDto {
    pub is_paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillTenantSummary {
    pub full_name: String,
    pub username: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillRoomSummary {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillListItemDto {
    #[serde(flatten)]
    pub bill: Bill,
    pub tenant: Option<BillTenantSummary>,
    pub room: Option<BillRoomSummary>,
}

impl BillListItemDto {
    pub fn from_row(row: BillWithRefs) -> Self {
        let tenant = match (row.tenant_full_name, row.tenant_username, row.tenant_phone) {
            (Some(full_name), Some(username), Some(phone)) => Some(BillTenantSummary {
                full_name,
                username,
                phone,
            }),
            _ => None,
        };

        BillListItemDto {
            bill: row.bill,
            tenant,
            room: row.room_name.map(|name| BillRoomSummary { name }),
        }
    }
}
