use std::sync::Arc;

use chrono::{Months, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    db::{contractdb::ContractExt, db::DBClient, roomdb::RoomExt, userdb::UserExt},
    dtos::contractdtos::{ContractDetailsDto, CreateContractDto},
    models::{
        contractmodel::{Contract, ContractStatus},
        roommodel::RoomStatus,
    },
    service::error::ServiceError,
};

pub const DEFAULT_DURATION_MONTHS: u32 = 12;

/// Adds the lease duration to the start date. Day overflow clamps to the last
/// day of the target month, so 2024-01-31 plus one month is 2024-02-29.
pub fn contract_end_date(
    start_date: NaiveDate,
    duration_months: Option<u32>,
) -> Result<NaiveDate, ServiceError> {
    let months = match duration_months {
        None | Some(0) => DEFAULT_DURATION_MONTHS,
        Some(months) => months,
    };

    start_date
        .checked_add_months(Months::new(months))
        .ok_or_else(|| ServiceError::Validation("Contract end date is out of range".to_string()))
}

#[derive(Debug, Clone)]
pub struct ContractService<S = DBClient> {
    store: Arc<S>,
}

impl<S> ContractService<S>
where
    S: ContractExt + RoomExt + UserExt + Send + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Writes the contract, marks the room rented and links the tenant. The
    /// three writes run concurrently; if any of them fails the ones that
    /// succeeded are reverted before the error is returned.
    pub async fn create_contract(&self, input: CreateContractDto) -> Result<Contract, ServiceError> {
        let (room, tenant) = tokio::try_join!(
            self.store.get_room(input.room_id),
            self.store.get_user(Some(input.tenant_id), None),
        )?;

        let room = room.ok_or(ServiceError::RoomNotFound(input.room_id))?;
        let tenant = tenant.ok_or(ServiceError::TenantNotFound(input.tenant_id))?;

        if room.status != RoomStatus::Available {
            tracing::warn!(
                "Creating contract for room {} which is currently {:?}",
                room.id,
                room.status
            );
        }

        let contract = Contract {
            id: Uuid::new_v4(),
            room_id: room.id,
            tenant_id: tenant.id,
            start_date: input.start_date,
            end_date: contract_end_date(input.start_date, input.duration_months)?,
            rental_price: input.rental_price.unwrap_or(0.0),
            deposit_amount: input.deposit_amount.unwrap_or(0.0),
            number_of_tenants: input.number_of_tenants.unwrap_or(1),
            status: ContractStatus::Active,
            service_ids: input.service_ids.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let (saved, room_update, tenant_update) = tokio::join!(
            self.store.save_contract(&contract),
            self.store.set_room_status(room.id, RoomStatus::Rented),
            self.store.set_user_room(tenant.id, Some(room.id)),
        );

        let mut failures = Vec::new();
        let contract_written = match &saved {
            Ok(_) => true,
            Err(e) => {
                failures.push(format!("saving contract: {}", e));
                false
            }
        };
        let room_written = match &room_update {
            Ok(Some(_)) => true,
            Ok(None) => {
                failures.push(format!("room {} disappeared", room.id));
                false
            }
            Err(e) => {
                failures.push(format!("updating room status: {}", e));
                false
            }
        };
        let tenant_written = match &tenant_update {
            Ok(Some(_)) => true,
            Ok(None) => {
                failures.push(format!("tenant {} disappeared", tenant.id));
                false
            }
            Err(e) => {
                failures.push(format!("linking tenant to room: {}", e));
                false
            }
        };

        if failures.is_empty() {
            tracing::info!(
                "Contract {} created: tenant {} in room {} until {}",
                contract.id,
                tenant.id,
                room.id,
                contract.end_date
            );
            return saved.map_err(ServiceError::from);
        }

        tracing::warn!(
            "Contract {} creation failed, reverting: {}",
            contract.id,
            failures.join("; ")
        );

        if contract_written {
            if let Err(e) = self.store.delete_contract(contract.id).await {
                tracing::error!("Failed to remove contract {} during rollback: {}", contract.id, e);
            }
        }
        if room_written {
            if let Err(e) = self.store.set_room_status(room.id, room.status).await {
                tracing::error!("Failed to restore status of room {}: {}", room.id, e);
            }
        }
        if tenant_written {
            if let Err(e) = self.store.set_user_room(tenant.id, tenant.room_id).await {
                tracing::error!("Failed to restore room of tenant {}: {}", tenant.id, e);
            }
        }

        Err(ServiceError::ContractRolledBack(failures.join("; ")))
    }

    /// Ends an ACTIVE lease. The room becomes available again unless another
    /// active contract still rents it, and the tenant is unlinked if they
    /// still point at that room with no other active lease on it. If freeing
    /// the room or tenant fails, the contract goes back to ACTIVE.
    pub async fn terminate_contract(&self, contract_id: Uuid) -> Result<Contract, ServiceError> {
        let contract = match self.store.terminate_active_contract(contract_id).await? {
            Some(contract) => contract,
            None => {
                let existing = self
                    .store
                    .get_contract(contract_id)
                    .await?
                    .ok_or(ServiceError::ContractNotFound(contract_id))?;
                return Err(ServiceError::Validation(format!(
                    "Contract {} is not active (status {:?})",
                    contract_id, existing.status
                )));
            }
        };

        if let Err(e) = self.release_room_and_tenant(&contract).await {
            tracing::warn!("Releasing contract {} failed, reactivating: {}", contract.id, e);
            if let Err(revert) = self
                .store
                .update_contract_status(contract.id, ContractStatus::Active)
                .await
            {
                tracing::error!("Failed to reactivate contract {}: {}", contract.id, revert);
            }
            return Err(e);
        }

        tracing::info!("Contract {} terminated for room {}", contract.id, contract.room_id);

        Ok(contract)
    }

    async fn release_room_and_tenant(&self, contract: &Contract) -> Result<(), ServiceError> {
        let room_freed = if self.store.room_has_active_contract(contract.room_id).await? {
            false
        } else {
            self.store
                .set_room_status(contract.room_id, RoomStatus::Available)
                .await?
                .is_some()
        };

        let (tenant, other_lease) = match tokio::try_join!(
            self.store.get_user(Some(contract.tenant_id), None),
            self.store.get_active_contract(contract.tenant_id),
        ) {
            Ok(found) => found,
            Err(e) => return Err(self.restore_rented(contract, room_freed, e).await),
        };

        let keeps_room = other_lease.map_or(false, |lease| lease.room_id == contract.room_id);
        if let Some(tenant) = tenant.filter(|t| t.room_id == Some(contract.room_id) && !keeps_room) {
            if let Err(e) = self.store.set_user_room(tenant.id, None).await {
                return Err(self.restore_rented(contract, room_freed, e).await);
            }
        }

        Ok(())
    }

    async fn restore_rented(
        &self,
        contract: &Contract,
        room_was_freed: bool,
        cause: sqlx::Error,
    ) -> ServiceError {
        if room_was_freed {
            if let Err(e) = self
                .store
                .set_room_status(contract.room_id, RoomStatus::Rented)
                .await
            {
                tracing::error!("Failed to restore status of room {}: {}", contract.room_id, e);
            }
        }
        ServiceError::from(cause)
    }

    pub async fn get_contract(&self, contract_id: Uuid) -> Result<ContractDetailsDto, ServiceError> {
        let contract = self
            .store
            .get_contract(contract_id)
            .await?
            .ok_or(ServiceError::ContractNotFound(contract_id))?;

        self.with_details(contract).await
    }

    pub async fn list_contracts(&self) -> Result<Vec<ContractDetailsDto>, ServiceError> {
        let contracts = self.store.get_contracts().await?;

        let mut details = Vec::with_capacity(contracts.len());
        for contract in contracts {
            details.push(self.with_details(contract).await?);
        }
        Ok(details)
    }

    /// The tenant's newest active contract, if any.
    pub async fn active_contract_for(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<ContractDetailsDto>, ServiceError> {
        match self.store.get_active_contract(tenant_id).await? {
            Some(contract) => Ok(Some(self.with_details(contract).await?)),
            None => Ok(None),
        }
    }

    async fn with_details(&self, contract: Contract) -> Result<ContractDetailsDto, ServiceError> {
        let (room, tenant) = tokio::try_join!(
            self.store.get_room(contract.room_id),
            self.store.get_user(Some(contract.tenant_id), None),
        )?;

        Ok(ContractDetailsDto::new(contract, room.as_ref(), tenant.as_ref()))
    }
}
