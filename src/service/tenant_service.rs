use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{
        db::DBClient,
        roomdb::RoomExt,
        userdb::{NewUser, ProfileUpdate, UserExt},
    },
    dtos::{
        roomdtos::RoomSummaryDto,
        userdtos::{CreateTenantDto, FilterUserDto, RoomAssignment, UpdateTenantDto, UserWithRoomDto},
    },
    models::usermodel::{User, UserRole},
    service::error::ServiceError,
    utils::password,
};

#[derive(Debug, Clone)]
pub struct TenantService<S = DBClient> {
    store: Arc<S>,
    default_password: String,
}

impl<S> TenantService<S>
where
    S: UserExt + RoomExt + Send + Sync,
{
    pub fn new(store: Arc<S>, default_password: impl Into<String>) -> Self {
        Self {
            store,
            default_password: default_password.into(),
        }
    }

    /// Tenants newest first, each with a summary of their room if it still exists.
    pub async fn list_tenants(&self) -> Result<Vec<UserWithRoomDto>, ServiceError> {
        let (tenants, rooms) = tokio::try_join!(self.store.get_tenants(), self.store.get_rooms())?;

        Ok(tenants
            .iter()
            .map(|tenant| UserWithRoomDto {
                user: FilterUserDto::filter_user(tenant),
                room: tenant
                    .room_id
                    .and_then(|room_id| rooms.iter().find(|room| room.id == room_id))
                    .map(RoomSummaryDto::from_room),
            })
            .collect())
    }

    pub async fn create_tenant(&self, body: CreateTenantDto) -> Result<User, ServiceError> {
        if self
            .store
            .get_user(None, Some(&body.username))
            .await?
            .is_some()
        {
            return Err(ServiceError::DuplicateUsername(body.username));
        }

        let room_id = match RoomAssignment::parse(body.room_id.as_deref())
            .map_err(ServiceError::Validation)?
        {
            RoomAssignment::Assign(room_id) => Some(room_id),
            RoomAssignment::Keep | RoomAssignment::Detach => None,
        };

        let hashed_password = password::hash(&body.password)?;

        let tenant = self
            .store
            .save_user(NewUser {
                username: body.username,
                password: hashed_password,
                full_name: body.full_name,
                phone: body.phone,
                role: UserRole::Tenant,
                room_id,
                email: body.email,
                national_id: body.national_id,
                permanent_address: body.permanent_address,
            })
            .await?;

        tracing::info!("Tenant {} ({}) created", tenant.username, tenant.id);
        Ok(tenant)
    }

    /// Edits the tenant record only. Assigning or clearing a room here does
    /// not change any room status or contract.
    pub async fn update_tenant(
        &self,
        tenant_id: Uuid,
        body: UpdateTenantDto,
    ) -> Result<User, ServiceError> {
        let assignment =
            RoomAssignment::parse(body.room_id.as_deref()).map_err(ServiceError::Validation)?;

        let profile = ProfileUpdate {
            full_name: body.full_name,
            phone: body.phone,
            email: body.email,
            national_id: body.national_id,
            permanent_address: body.permanent_address,
        };

        let mut tenant = self
            .store
            .update_user_profile(tenant_id, profile)
            .await?
            .ok_or(ServiceError::TenantNotFound(tenant_id))?;

        let room_id = match assignment {
            RoomAssignment::Keep => return Ok(tenant),
            RoomAssignment::Detach => None,
            RoomAssignment::Assign(room_id) => Some(room_id),
        };

        tenant = self
            .store
            .set_user_room(tenant_id, room_id)
            .await?
            .ok_or(ServiceError::TenantNotFound(tenant_id))?;

        Ok(tenant)
    }

    /// Contracts and room status are left as they are.
    pub async fn delete_tenant(&self, tenant_id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete_user(tenant_id).await? {
            return Err(ServiceError::TenantNotFound(tenant_id));
        }

        tracing::info!("Tenant {} deleted", tenant_id);
        Ok(())
    }

    pub async fn reset_password(&self, tenant_id: Uuid) -> Result<(), ServiceError> {
        let hashed_password = password::hash(&self.default_password)?;

        self.store
            .update_user_password(tenant_id, hashed_password)
            .await?
            .ok_or(ServiceError::TenantNotFound(tenant_id))?;

        tracing::info!("Password of tenant {} reset to the default", tenant_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{contractdb::ContractExt, memory::MemoryStore},
        models::{
            contractmodel::{Contract, ContractStatus},
            roommodel::RoomStatus,
        },
    };
    use chrono::{NaiveDate, Utc};

    fn service(store: &Arc<MemoryStore>) -> TenantService<MemoryStore> {
        TenantService::new(store.clone(), "123456")
    }

    fn create_body(username: &str, room_id: Option<String>) -> CreateTenantDto {
        CreateTenantDto {
            username: username.to_string(),
            password: "secret1".to_string(),
            full_name: "Nguyen Van A".to_string(),
            phone: "0987654321".to_string(),
            room_id,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_tenant_has_hashed_password_and_room() {
        let store = Arc::new(MemoryStore::new());
        let room = store.insert_room("Room 301", 3, 4_500_000.0);

        let tenant = service(&store)
            .create_tenant(create_body("nguyenvana", Some(room.id.to_string())))
            .await
            .unwrap();

        assert_eq!(tenant.role, UserRole::Tenant);
        assert_eq!(tenant.room_id, Some(room.id));
        assert_ne!(tenant.password, "secret1");
        assert!(password::compare("secret1", &tenant.password).unwrap());
        // Assigning through the tenant path leaves the room status alone
        assert_eq!(store.room(room.id).unwrap().status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        service.create_tenant(create_body("dup", None)).await.unwrap();
        let err = service.create_tenant(create_body("dup", None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateUsername(_)));
    }

    #[tokio::test]
    async fn update_distinguishes_keep_detach_and_assign() {
        let store = Arc::new(MemoryStore::new());
        let room = store.insert_room("Room 302", 3, 4_500_000.0);
        let other = store.insert_room("Room 303", 3, 4_500_000.0);
        let tenant = store.insert_tenant("tenant_a", Some(room.id));
        let service = service(&store);

        let updated = service
            .update_tenant(
                tenant.id,
                UpdateTenantDto {
                    full_name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name, "Renamed");
        assert_eq!(updated.room_id, Some(room.id));

        let updated = service
            .update_tenant(
                tenant.id,
                UpdateTenantDto {
                    room_id: Some(other.id.to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.room_id, Some(other.id));
        assert_eq!(store.room(other.id).unwrap().status, RoomStatus::Available);

        let updated = service
            .update_tenant(
                tenant.id,
                UpdateTenantDto {
                    room_id: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.room_id, None);
    }

    #[tokio::test]
    async fn updating_unknown_tenant_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let err = service(&store)
            .update_tenant(Uuid::new_v4(), UpdateTenantDto::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::TenantNotFound(_)));
    }

    #[tokio::test]
    async fn deleting_a_tenant_leaves_the_contract() {
        let store = Arc::new(MemoryStore::new());
        let room = store.insert_room("Room 304", 3, 4_500_000.0);
        let tenant = store.insert_tenant("tenant_b", Some(room.id));
        let contract = Contract {
            id: Uuid::new_v4(),
            room_id: room.id,
            tenant_id: tenant.id,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            rental_price: 4_200_000.0,
            deposit_amount: 0.0,
            number_of_tenants: 1,
            status: ContractStatus::Active,
            service_ids: vec![],
            created_at: Utc::now(),
        };
        store.save_contract(&contract).await.unwrap();
        store.set_room_status(room.id, RoomStatus::Rented).await.unwrap();
        let service = service(&store);

        service.delete_tenant(tenant.id).await.unwrap();

        assert!(store.user(tenant.id).is_none());
        assert_eq!(store.contract(contract.id).unwrap().status, ContractStatus::Active);
        assert_eq!(store.room(room.id).unwrap().status, RoomStatus::Rented);

        let err = service.delete_tenant(tenant.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::TenantNotFound(_)));
    }

    #[tokio::test]
    async fn list_attaches_live_rooms_only() {
        let store = Arc::new(MemoryStore::new());
        let room = store.insert_room("Room 305", 3, 4_500_000.0);
        store.insert_tenant("housed", Some(room.id));
        store.insert_tenant("dangling", Some(Uuid::new_v4()));
        store.insert_tenant("homeless", None);

        let tenants = service(&store).list_tenants().await.unwrap();
        assert_eq!(tenants.len(), 3);

        let housed = tenants.iter().find(|t| t.user.username == "housed").unwrap();
        assert_eq!(housed.room.as_ref().map(|r| r.name.as_str()), Some("Room 305"));

        let dangling = tenants.iter().find(|t| t.user.username == "dangling").unwrap();
        assert!(dangling.room.is_none());
    }

    #[tokio::test]
    async fn reset_password_uses_the_default() {
        let store = Arc::new(MemoryStore::new());
        let tenant = store.insert_tenant("forgetful", None);

        service(&store).reset_password(tenant.id).await.unwrap();

        let stored = store.user(tenant.id).unwrap();
        assert!(password::compare("123456", &stored.password).unwrap());
    }
}
