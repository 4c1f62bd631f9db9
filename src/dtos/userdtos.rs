use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    db::userdb::ProfileUpdate,
    dtos::roomdtos::RoomSummaryDto,
    models::usermodel::{User, UserRole},
};

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone_regex = regex::Regex::new(r"^(\+?[0-9]{1,3}[- ]?)?[0-9]{3}[- ]?[0-9]{3}[- ]?[0-9]{4}$")
        .map_err(|_| ValidationError::new("Invalid phone regex"))?;

    if !phone_regex.is_match(phone) {
        let mut error = ValidationError::new("invalid_phone");
        error.message = Some(Cow::from(
            "Phone number must be in a valid format (e.g., 0987654321 or +84 987 654 3210)",
        ));
        return Err(error);
    }
    Ok(())
}

/// How a tenant edit treats the room reference: absent keeps it, an empty
/// string detaches, anything else must be a room id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomAssignment {
    Keep,
    Detach,
    Assign(Uuid),
}

impl RoomAssignment {
    pub fn parse(raw: Option<&str>) -> Result<Self, String> {
        match raw.map(str::trim) {
            None => Ok(RoomAssignment::Keep),
            Some("") => Ok(RoomAssignment::Detach),
            Some(id) => Uuid::parse_str(id)
                .map(RoomAssignment::Assign)
                .map_err(|_| format!("Invalid room id: {}", id)),
        }
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateTenantDto {
    #[validate(length(min = 1, max = 100, message = "Username must be between 1-100 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[serde(alias = "roomId")]
    pub room_id: Option<String>,

    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: Option<String>,

    #[serde(alias = "cccd")]
    #[validate(length(max = 50, message = "National ID must be at most 50 characters"))]
    pub national_id: Option<String>,

    #[serde(alias = "address_permanent")]
    pub permanent_address: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateTenantDto {
    #[validate(length(min = 1, max = 255, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[serde(alias = "roomId")]
    pub room_id: Option<String>,

    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: Option<String>,

    #[serde(alias = "cccd")]
    #[validate(length(max = 50, message = "National ID must be at most 50 characters"))]
    pub national_id: Option<String>,

    #[serde(alias = "address_permanent")]
    pub permanent_address: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 255, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(max = 255, message = "Email must be at most 255 characters"))]
    pub email: Option<String>,

    #[serde(alias = "cccd")]
    #[validate(length(max = 50, message = "National ID must be at most 50 characters"))]
    pub national_id: Option<String>,

    #[serde(alias = "address_permanent")]
    pub permanent_address: Option<String>,
}

impl From<UpdateProfileDto> for ProfileUpdate {
    fn from(body: UpdateProfileDto) -> Self {
        ProfileUpdate {
            full_name: body.full_name,
            phone: body.phone,
            email: body.email,
            national_id: body.national_id,
            permanent_address: body.permanent_address,
        }
    }
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct ChangePasswordDto {
    #[serde(alias = "oldPassword")]
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[serde(alias = "newPassword")]
    #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub phone: String,
    pub role: String,
    pub room_id: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub permanent_address: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            username: user.username.to_owned(),
            full_name: user.full_name.to_owned(),
            phone: user.phone.to_owned(),
            role: user.role.to_str().to_string(),
            room_id: user.room_id.map(|id| id.to_string()),
            email: user.email.clone(),
            national_id: user.national_id.clone(),
            permanent_address: user.permanent_address.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A user together with what is left of their room.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserWithRoomDto {
    #[serde(flatten)]
    pub user: FilterUserDto,
    pub room: Option<RoomSummaryDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}
