use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{billdb::BillExt, db::DBClient, roomdb::RoomExt, userdb::UserExt},
    dtos::billdtos::CreateBillDto,
    models::billmodel::{Bill, BillWithRefs},
    service::error::ServiceError,
};

/// Prices applied when a bill request leaves a unit price out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitPrices {
    pub electricity: f64,
    pub water: f64,
}

impl Default for UnitPrices {
    fn default() -> Self {
        UnitPrices {
            electricity: 3500.0,
            water: 20000.0,
        }
    }
}

/// A supplied price of 0 (or NaN) counts as not supplied.
pub fn effective_unit_price(supplied: Option<f64>, default: f64) -> f64 {
    match supplied {
        Some(price) if price != 0.0 && !price.is_nan() => price,
        _ => default,
    }
}

#[derive(Debug, Clone)]
pub struct BillService<S = DBClient> {
    store: Arc<S>,
    defaults: UnitPrices,
}

impl<S> BillService<S>
where
    S: UserExt + RoomExt + BillExt + Send + Sync,
{
    pub fn new(store: Arc<S>, defaults: UnitPrices) -> Self {
        Self { store, defaults }
    }

    pub async fn create_bill(&self, input: CreateBillDto) -> Result<Bill, ServiceError> {
        let tenant = self
            .store
            .get_user(Some(input.tenant_id), None)
            .await?
            .ok_or(ServiceError::TenantWithoutRoom(input.tenant_id))?;

        let room_id = tenant
            .room_id
            .ok_or(ServiceError::TenantWithoutRoom(tenant.id))?;

        // The tenant's room reference may point at a deleted room
        let room = self
            .store
            .get_room(room_id)
            .await?
            .ok_or(ServiceError::TenantWithoutRoom(tenant.id))?;

        let mut bill = Bill {
            id: Uuid::new_v4(),
            tenant_id: tenant.id,
            room_id: room.id,
            month: input.month,
            year: input.year,
            elec_old: input.elec_old,
            elec_new: input.elec_new,
            elec_price: effective_unit_price(input.elec_price, self.defaults.electricity),
            water_old: input.water_old,
            water_new: input.water_new,
            water_price: effective_unit_price(input.water_price, self.defaults.water),
            room_price: room.base_price,
            service_fee: input.service_fee.unwrap_or(0.0),
            other_fee: input.other_fee.unwrap_or(0.0),
            total_amount: 0.0,
            is_paid: false,
            created_at: Utc::now(),
        };

        if bill.elec_new < bill.elec_old || bill.water_new < bill.water_old {
            tracing::warn!(
                "Bill for tenant {} ({}/{}) has a meter going backwards: elec {} -> {}, water {} -> {}",
                tenant.id, bill.month, bill.year,
                bill.elec_old, bill.elec_new, bill.water_old, bill.water_new
            );
        }

        bill.total_amount = bill.computed_total();
        if !bill.total_amount.is_finite() {
            return Err(ServiceError::Validation(format!(
                "Bill total for tenant {} is out of range",
                tenant.id
            )));
        }

        let saved = self.store.save_bill(&bill).await?;

        tracing::info!(
            "Created bill {} for tenant {} room {} ({}/{}): total {}",
            saved.id, saved.tenant_id, saved.room_id, saved.month, saved.year, saved.total_amount
        );

        Ok(saved)
    }

    pub async fn list_bills(&self) -> Result<Vec<BillWithRefs>, ServiceError> {
        Ok(self.store.get_bills().await?)
    }

    pub async fn tenant_bills(&self, tenant_id: Uuid) -> Result<Vec<BillWithRefs>, ServiceError> {
        Ok(self.store.get_tenant_bills(tenant_id).await?)
    }

    pub async fn set_paid(&self, bill_id: Uuid, is_paid: bool) -> Result<Bill, ServiceError> {
        self.store
            .update_bill_paid(bill_id, is_paid)
            .await?
            .ok_or(ServiceError::BillNotFound(bill_id))
    }

    /// Deleting an unknown id succeeds.
    pub async fn delete_bill(&self, bill_id: Uuid) -> Result<(), ServiceError> {
        self.store.delete_bill(bill_id).await?;
        Ok(())
    }
}
