use std::sync::Arc;

use crate::{
    db::{dashboarddb::DashboardExt, db::DBClient},
    dtos::dashboarddtos::DashboardStats,
    models::roommodel::RoomStatus,
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct DashboardService<S = DBClient> {
    store: Arc<S>,
}

impl<S> DashboardService<S>
where
    S: DashboardExt + Send + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Runs the aggregate queries concurrently. Any failing query fails the
    /// whole request; partial stats are never returned.
    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let (total_rooms, empty_rooms, pending_bills, pending_amount, revenue) = tokio::try_join!(
            self.store.count_rooms(None),
            self.store.count_rooms(Some(RoomStatus::Available)),
            self.store.count_bills(false),
            self.store.sum_bill_totals(false),
            self.store.sum_bill_totals(true),
        )?;

        Ok(DashboardStats {
            total_rooms,
            empty_rooms,
            // Rooms under maintenance count as rented here
            rented_rooms: total_rooms - empty_rooms,
            pending_bills,
            pending_amount,
            revenue,
        })
    }
}
