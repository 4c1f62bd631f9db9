use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::roomdtos::RoomSummaryDto,
    models::{contractmodel::Contract, roommodel::Room, usermodel::User},
};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateContractDto {
    pub room_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,

    // Absent or 0 means a one-year lease
    #[validate(range(max = 1200, message = "Duration cannot exceed 1200 months"))]
    pub duration_months: Option<u32>,

    #[validate(range(min = 0.0, message = "Deposit cannot be negative"))]
    pub deposit_amount: Option<f64>,

    #[validate(range(min = 0.0, message = "Rental price cannot be negative"))]
    pub rental_price: Option<f64>,

    #[validate(range(min = 1, message = "A contract needs at least one tenant"))]
    pub number_of_tenants: Option<i32>,

    pub service_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContractTenantDto {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub national_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDetailsDto {
    #[serde(flatten)]
    pub contract: Contract,
    pub room: Option<RoomSummaryDto>,
    pub tenant: Option<ContractTenantDto>,
}

impl ContractDetailsDto {
    pub fn new(contract: Contract, room: Option<&Room>, tenant: Option<&User>) -> Self {
        ContractDetailsDto {
            contract,
            room: room.map(RoomSummaryDto::from_room),
            tenant: tenant.map(|user| ContractTenantDto {
                id: user.id.to_string(),
                full_name: user.full_name.to_owned(),
                phone: user.phone.to_owned(),
                national_id: user.national_id.clone(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateContractResponseDto {
    pub status: String,
    pub message: String,
    pub contract: Contract,
}
