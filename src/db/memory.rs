//! In-process store used by the service tests. Mirrors the Postgres
//! implementations closely enough to exercise the flows, and lets a test make
//! individual writes fail.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{
        billdb::BillExt,
        contractdb::ContractExt,
        dashboarddb::DashboardExt,
        roomdb::{NewRoom, RoomExt, RoomUpdate},
        seeddb::SeedExt,
        servicedb::{NewServiceItem, ServiceCatalogExt},
        userdb::{NewUser, ProfileUpdate, UserExt},
    },
    models::{
        billmodel::{Bill, BillWithRefs},
        contractmodel::{Contract, ContractStatus},
        roommodel::{Room, RoomStatus},
        servicemodel::ServiceItem,
        usermodel::{User, UserRole},
    },
};

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    rooms: Mutex<HashMap<Uuid, Room>>,
    contracts: Mutex<HashMap<Uuid, Contract>>,
    bills: Mutex<HashMap<Uuid, Bill>>,
    services: Mutex<HashMap<Uuid, ServiceItem>>,

    pub fail_save_contract: AtomicBool,
    pub fail_room_status: AtomicBool,
    pub fail_user_room: AtomicBool,
    pub fail_bill_sums: AtomicBool,
}

fn injected(flag: &AtomicBool, what: &str) -> Result<(), sqlx::Error> {
    if flag.load(Ordering::SeqCst) {
        return Err(sqlx::Error::Protocol(format!("injected failure: {}", what)));
    }
    Ok(())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(flag: &AtomicBool) {
        flag.store(true, Ordering::SeqCst);
    }

    pub fn insert_room(&self, name: &str, floor: i32, base_price: f64) -> Room {
        let room = Room {
            id: Uuid::new_v4(),
            name: name.to_string(),
            floor,
            area_m2: Some(20.0),
            base_price,
            status: RoomStatus::Available,
            facilities: vec![],
            images: vec![],
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        self.rooms.lock().unwrap().insert(room.id, room.clone());
        room
    }

    pub fn insert_tenant(&self, username: &str, room_id: Option<Uuid>) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password: "not-a-real-hash".to_string(),
            full_name: format!("Tenant {}", username),
            phone: "0987654321".to_string(),
            role: UserRole::Tenant,
            room_id,
            email: None,
            national_id: None,
            permanent_address: None,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }

    pub fn insert_bill(&self, bill: Bill) {
        self.bills.lock().unwrap().insert(bill.id, bill);
    }

    pub fn room(&self, room_id: Uuid) -> Option<Room> {
        self.rooms.lock().unwrap().get(&room_id).cloned()
    }

    pub fn user(&self, user_id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&user_id).cloned()
    }

    pub fn contract(&self, contract_id: Uuid) -> Option<Contract> {
        self.contracts.lock().unwrap().get(&contract_id).cloned()
    }

    pub fn contract_count(&self) -> usize {
        self.contracts.lock().unwrap().len()
    }

    fn with_refs(&self, bill: &Bill) -> BillWithRefs {
        let users = self.users.lock().unwrap();
        let rooms = self.rooms.lock().unwrap();
        let tenant = users.get(&bill.tenant_id);
        BillWithRefs {
            bill: bill.clone(),
            tenant_full_name: tenant.map(|u| u.full_name.clone()),
            tenant_username: tenant.map(|u| u.username.clone()),
            tenant_phone: tenant.map(|u| u.phone.clone()),
            room_name: rooms.get(&bill.room_id).map(|r| r.name.clone()),
        }
    }
}

#[async_trait]
impl UserExt for MemoryStore {
    async fn get_user(
        &self,
        user_id: Option<Uuid>,
        username: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let users = self.users.lock().unwrap();
        if let Some(user_id) = user_id {
            return Ok(users.get(&user_id).cloned());
        }
        Ok(username.and_then(|name| users.values().find(|u| u.username == name).cloned()))
    }

    async fn get_tenants(&self) -> Result<Vec<User>, sqlx::Error> {
        let mut tenants: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.role == UserRole::Tenant)
            .cloned()
            .collect();
        tenants.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tenants)
    }

    async fn save_user(&self, new_user: NewUser) -> Result<User, sqlx::Error> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.username == new_user.username) {
            return Err(sqlx::Error::Protocol("duplicate username".to_string()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            password: new_user.password,
            full_name: new_user.full_name,
            phone: new_user.phone,
            role: new_user.role,
            room_id: new_user.room_id,
            email: new_user.email,
            national_id: new_user.national_id,
            permanent_address: new_user.permanent_address,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user_profile(
        &self,
        user_id: Uuid,
        profile: ProfileUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(&user_id).map(|user| {
            if let Some(full_name) = profile.full_name {
                user.full_name = full_name;
            }
            if let Some(phone) = profile.phone {
                user.phone = phone;
            }
            if profile.email.is_some() {
                user.email = profile.email;
            }
            if profile.national_id.is_some() {
                user.national_id = profile.national_id;
            }
            if profile.permanent_address.is_some() {
                user.permanent_address = profile.permanent_address;
            }
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(&user_id).map(|user| {
            user.password = password;
            user.clone()
        }))
    }

    async fn set_user_room(
        &self,
        user_id: Uuid,
        room_id: Option<Uuid>,
    ) -> Result<Option<User>, sqlx::Error> {
        injected(&self.fail_user_room, "set_user_room")?;
        let mut users = self.users.lock().unwrap();
        Ok(users.get_mut(&user_id).map(|user| {
            user.room_id = room_id;
            user.clone()
        }))
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(self.users.lock().unwrap().remove(&user_id).is_some())
    }
}

#[async_trait]
impl RoomExt for MemoryStore {
    async fn get_rooms(&self) -> Result<Vec<Room>, sqlx::Error> {
        let mut rooms: Vec<Room> = self.rooms.lock().unwrap().values().cloned().collect();
        rooms.sort_by(|a, b| a.floor.cmp(&b.floor).then_with(|| a.name.cmp(&b.name)));
        Ok(rooms)
    }

    async fn get_room(&self, room_id: Uuid) -> Result<Option<Room>, sqlx::Error> {
        Ok(self.room(room_id))
    }

    async fn get_room_by_name(&self, name: &str) -> Result<Option<Room>, sqlx::Error> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .values()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn save_room(&self, new_room: NewRoom) -> Result<Room, sqlx::Error> {
        let room = Room {
            id: Uuid::new_v4(),
            name: new_room.name,
            floor: new_room.floor,
            area_m2: new_room.area_m2,
            base_price: new_room.base_price,
            status: new_room.status,
            facilities: new_room.facilities,
            images: vec![],
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        self.rooms.lock().unwrap().insert(room.id, room.clone());
        Ok(room)
    }

    async fn update_room(
        &self,
        room_id: Uuid,
        update: RoomUpdate,
    ) -> Result<Option<Room>, sqlx::Error> {
        let mut rooms = self.rooms.lock().unwrap();
        Ok(rooms.get_mut(&room_id).map(|room| {
            if let Some(name) = update.name {
                room.name = name;
            }
            if let Some(floor) = update.floor {
                room.floor = floor;
            }
            if update.area_m2.is_some() {
                room.area_m2 = update.area_m2;
            }
            if let Some(base_price) = update.base_price {
                room.base_price = base_price;
            }
            if let Some(status) = update.status {
                room.status = status;
            }
            if let Some(facilities) = update.facilities {
                room.facilities = facilities;
            }
            room.clone()
        }))
    }

    async fn set_room_status(
        &self,
        room_id: Uuid,
        status: RoomStatus,
    ) -> Result<Option<Room>, sqlx::Error> {
        injected(&self.fail_room_status, "set_room_status")?;
        let mut rooms = self.rooms.lock().unwrap();
        Ok(rooms.get_mut(&room_id).map(|room| {
            room.status = status;
            room.clone()
        }))
    }

    async fn delete_room(&self, room_id: Uuid) -> Result<bool, sqlx::Error> {
        for user in self.users.lock().unwrap().values_mut() {
            if user.room_id == Some(room_id) {
                user.room_id = None;
            }
        }
        Ok(self.rooms.lock().unwrap().remove(&room_id).is_some())
    }
}

#[async_trait]
impl ContractExt for MemoryStore {
    async fn save_contract(&self, contract: &Contract) -> Result<Contract, sqlx::Error> {
        injected(&self.fail_save_contract, "save_contract")?;
        self.contracts
            .lock()
            .unwrap()
            .insert(contract.id, contract.clone());
        Ok(contract.clone())
    }

    async fn get_contract(&self, contract_id: Uuid) -> Result<Option<Contract>, sqlx::Error> {
        Ok(self.contract(contract_id))
    }

    async fn get_contracts(&self) -> Result<Vec<Contract>, sqlx::Error> {
        let mut contracts: Vec<Contract> =
            self.contracts.lock().unwrap().values().cloned().collect();
        contracts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(contracts)
    }

    async fn get_active_contract(&self, tenant_id: Uuid) -> Result<Option<Contract>, sqlx::Error> {
        Ok(self
            .contracts
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.tenant_id == tenant_id && c.status == ContractStatus::Active)
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn update_contract_status(
        &self,
        contract_id: Uuid,
        status: ContractStatus,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let mut contracts = self.contracts.lock().unwrap();
        Ok(contracts.get_mut(&contract_id).map(|contract| {
            contract.status = status;
            contract.clone()
        }))
    }

    async fn terminate_active_contract(
        &self,
        contract_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let mut contracts = self.contracts.lock().unwrap();
        Ok(contracts
            .get_mut(&contract_id)
            .filter(|contract| contract.status == ContractStatus::Active)
            .map(|contract| {
                contract.status = ContractStatus::Terminated;
                contract.clone()
            }))
    }

    async fn room_has_active_contract(&self, room_id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(self
            .contracts
            .lock()
            .unwrap()
            .values()
            .any(|c| c.room_id == room_id && c.status == ContractStatus::Active))
    }

    async fn delete_contract(&self, contract_id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(self.contracts.lock().unwrap().remove(&contract_id).is_some())
    }
}

#[async_trait]
impl BillExt for MemoryStore {
    async fn get_bills(&self) -> Result<Vec<BillWithRefs>, sqlx::Error> {
        let mut bills: Vec<Bill> = self.bills.lock().unwrap().values().cloned().collect();
        bills.sort_by(|a, b| {
            b.year
                .cmp(&a.year)
                .then_with(|| b.month.cmp(&a.month))
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(bills.iter().map(|bill| self.with_refs(bill)).collect())
    }

    async fn get_tenant_bills(&self, tenant_id: Uuid) -> Result<Vec<BillWithRefs>, sqlx::Error> {
        let bills = self.get_bills().await?;
        Ok(bills
            .into_iter()
            .filter(|b| b.bill.tenant_id == tenant_id)
            .collect())
    }

    async fn save_bill(&self, bill: &Bill) -> Result<Bill, sqlx::Error> {
        self.bills.lock().unwrap().insert(bill.id, bill.clone());
        Ok(bill.clone())
    }

    async fn update_bill_paid(
        &self,
        bill_id: Uuid,
        is_paid: bool,
    ) -> Result<Option<Bill>, sqlx::Error> {
        let mut bills = self.bills.lock().unwrap();
        Ok(bills.get_mut(&bill_id).map(|bill| {
            bill.is_paid = is_paid;
            bill.clone()
        }))
    }

    async fn delete_bill(&self, bill_id: Uuid) -> Result<(), sqlx::Error> {
        self.bills.lock().unwrap().remove(&bill_id);
        Ok(())
    }
}

#[async_trait]
impl ServiceCatalogExt for MemoryStore {
    async fn get_services(&self) -> Result<Vec<ServiceItem>, sqlx::Error> {
        let mut services: Vec<ServiceItem> =
            self.services.lock().unwrap().values().cloned().collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }

    async fn save_service(&self, item: NewServiceItem) -> Result<ServiceItem, sqlx::Error> {
        let service = ServiceItem {
            id: Uuid::new_v4(),
            name: item.name,
            unit: item.unit,
            price: item.price,
            service_type: item.service_type,
        };
        self.services
            .lock()
            .unwrap()
            .insert(service.id, service.clone());
        Ok(service)
    }

    async fn delete_service(&self, service_id: Uuid) -> Result<bool, sqlx::Error> {
        Ok(self.services.lock().unwrap().remove(&service_id).is_some())
    }
}

#[async_trait]
impl DashboardExt for MemoryStore {
    async fn count_rooms(&self, status: Option<RoomStatus>) -> Result<i64, sqlx::Error> {
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .count() as i64)
    }

    async fn count_bills(&self, is_paid: bool) -> Result<i64, sqlx::Error> {
        Ok(self
            .bills
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.is_paid == is_paid)
            .count() as i64)
    }

    async fn sum_bill_totals(&self, is_paid: bool) -> Result<f64, sqlx::Error> {
        injected(&self.fail_bill_sums, "sum_bill_totals")?;
        Ok(self
            .bills
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.is_paid == is_paid)
            .map(|b| b.total_amount)
            .sum())
    }
}

#[async_trait]
impl SeedExt for MemoryStore {
    async fn clear_all(&self) -> Result<(), sqlx::Error> {
        self.bills.lock().unwrap().clear();
        self.contracts.lock().unwrap().clear();
        self.users.lock().unwrap().clear();
        self.rooms.lock().unwrap().clear();
        Ok(())
    }
}
