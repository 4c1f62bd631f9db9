use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    db::roomdb::{NewRoom, RoomUpdate},
    models::roommodel::{Room, RoomStatus},
};

/// Facilities arrive either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FacilitiesInput {
    List(Vec<String>),
    Csv(String),
}

impl FacilitiesInput {
    pub fn into_vec(self) -> Vec<String> {
        let items = match self {
            FacilitiesInput::List(items) => items,
            FacilitiesInput::Csv(raw) => raw.split(',').map(str::to_string).collect(),
        };

        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomDto {
    #[validate(length(min = 1, max = 100, message = "Room name must be between 1-100 characters"))]
    pub name: String,

    pub floor: i32,

    #[validate(range(min = 0.0, message = "Area cannot be negative"))]
    pub area_m2: Option<f64>,

    #[validate(range(min = 0.0, message = "Base price cannot be negative"))]
    pub base_price: f64,

    pub status: Option<RoomStatus>,

    pub facilities: Option<FacilitiesInput>,
}

impl From<CreateRoomDto> for NewRoom {
    fn from(body: CreateRoomDto) -> Self {
        NewRoom {
            name: body.name.trim().to_string(),
            floor: body.floor,
            area_m2: body.area_m2,
            base_price: body.base_price,
            status: body.status.unwrap_or_default(),
            facilities: body
                .facilities
                .map(FacilitiesInput::into_vec)
                .unwrap_or_default(),
        }
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateRoomDto {
    #[validate(length(min = 1, max = 100, message = "Room name must be between 1-100 characters"))]
    pub name: Option<String>,

    pub floor: Option<i32>,

    #[validate(range(min = 0.0, message = "Area cannot be negative"))]
    pub area_m2: Option<f64>,

    #[validate(range(min = 0.0, message = "Base price cannot be negative"))]
    pub base_price: Option<f64>,

    pub status: Option<RoomStatus>,

    pub facilities: Option<FacilitiesInput>,
}

impl From<UpdateRoomDto> for RoomUpdate {
    fn from(body: UpdateRoomDto) -> Self {
        RoomUpdate {
            name: body.name.map(|name| name.trim().to_string()),
            floor: body.floor,
            area_m2: body.area_m2,
            base_price: body.base_price,
            status: body.status,
            facilities: body.facilities.map(FacilitiesInput::into_vec),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSummaryDto {
    pub id: String,
    pub name: String,
    pub floor: i32,
    pub area_m2: Option<f64>,
    pub base_price: f64,
    pub facilities: Vec<String>,
}

impl RoomSummaryDto {
    pub fn from_room(room: &Room) -> Self {
        RoomSummaryDto {
            id: room.id.to_string(),
            name: room.name.to_owned(),
            floor: room.floor,
            area_m2: room.area_m2,
            base_price: room.base_price,
            facilities: room.facilities.clone(),
        }
    }
}
