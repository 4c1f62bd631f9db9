use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{db::servicedb::NewServiceItem, models::servicemodel::ServiceType};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceDto {
    #[validate(length(min = 1, max = 100, message = "Service name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 30, message = "Unit is required"))]
    pub unit: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[serde(rename = "type", default)]
    pub service_type: ServiceType,
}

impl From<CreateServiceDto> for NewServiceItem {
    fn from(body: CreateServiceDto) -> Self {
        NewServiceItem {
            name: body.name,
            unit: body.unit,
            price: body.price,
            service_type: body.service_type,
        }
    }
}
