use chrono::{Months, Utc};
use uuid::Uuid;

use crate::{
    db::{
        contractdb::ContractExt,
        roomdb::{NewRoom, RoomExt},
        seeddb::SeedExt,
        userdb::{NewUser, UserExt},
    },
    models::{
        contractmodel::{Contract, ContractStatus},
        roommodel::RoomStatus,
        usermodel::UserRole,
    },
    service::error::ServiceError,
    utils::password,
};

/// Wipes users, rooms, contracts and bills, then inserts one rented VIP room,
/// its tenant, an admin account and an active one-year contract. Both accounts
/// get `default_password`.
pub async fn seed_demo_data<S>(store: &S, default_password: &str) -> Result<(), ServiceError>
where
    S: SeedExt + RoomExt + UserExt + ContractExt + Send + Sync,
{
    store.clear_all().await?;

    let hashed_password = password::hash(default_password)?;

    let room = store
        .save_room(NewRoom {
            name: "Phòng 301 (VIP)".to_string(),
            floor: 3,
            area_m2: Some(45.0),
            base_price: 4_500_000.0,
            status: RoomStatus::Rented,
            facilities: vec![
                "Điều hòa".to_string(),
                "Nóng lạnh".to_string(),
                "Tủ lạnh".to_string(),
            ],
        })
        .await?;

    let tenant = store
        .save_user(NewUser {
            username: "nguyenvana".to_string(),
            password: hashed_password.clone(),
            full_name: "Nguyễn Văn A".to_string(),
            phone: "0987654321".to_string(),
            role: UserRole::Tenant,
            room_id: Some(room.id),
            email: Some("vana@email.com".to_string()),
            national_id: Some("001090000001".to_string()),
            permanent_address: Some("Hà Nội".to_string()),
        })
        .await?;

    store
        .save_user(NewUser {
            username: "admin".to_string(),
            password: hashed_password,
            full_name: "Quản Trị Viên".to_string(),
            phone: "0900000000".to_string(),
            role: UserRole::Admin,
            room_id: None,
            email: None,
            national_id: None,
            permanent_address: None,
        })
        .await?;

    let today = Utc::now().date_naive();
    let end_date = today
        .checked_add_months(Months::new(12))
        .ok_or_else(|| ServiceError::Other("Seed contract end date out of range".to_string()))?;

    store
        .save_contract(&Contract {
            id: Uuid::new_v4(),
            room_id: room.id,
            tenant_id: tenant.id,
            start_date: today,
            end_date,
            rental_price: 4_200_000.0,
            deposit_amount: 4_000_000.0,
            number_of_tenants: 1,
            status: ContractStatus::Active,
            service_ids: vec![],
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!("Demo data seeded: room {}, tenant {}, admin account", room.id, tenant.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    #[tokio::test]
    async fn seeding_replaces_existing_data() {
        let store = MemoryStore::new();
        let stale = store.insert_tenant("stale", None);

        seed_demo_data(&store, "123456").await.unwrap();

        assert!(store.user(stale.id).is_none());
        assert_eq!(store.contract_count(), 1);

        let admin = store.get_user(None, Some("admin")).await.unwrap().unwrap();
        assert!(admin.is_admin());
        assert!(password::compare("123456", &admin.password).unwrap());

        let tenant = store.get_user(None, Some("nguyenvana")).await.unwrap().unwrap();
        let room = store.room(tenant.room_id.unwrap()).unwrap();
        assert_eq!(room.status, RoomStatus::Rented);
        assert_eq!(room.base_price, 4_500_000.0);

        let contract = store.get_active_contract(tenant.id).await.unwrap().unwrap();
        assert_eq!(contract.room_id, room.id);
        assert_eq!(contract.rental_price, 4_200_000.0);
    }

    #[tokio::test]
    async fn seeding_twice_is_repeatable() {
        let store = MemoryStore::new();
        seed_demo_data(&store, "123456").await.unwrap();
        seed_demo_data(&store, "123456").await.unwrap();

        assert_eq!(store.contract_count(), 1);
    }
}
