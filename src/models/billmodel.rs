use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Monthly charge for a tenant's room. Room price and both unit prices are
/// copied in at creation so later edits never change a stored bill.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Bill {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub room_id: Uuid,
    pub month: i32,
    pub year: i32,

    pub elec_old: f64,
    pub elec_new: f64,
    pub elec_price: f64,

    pub water_old: f64,
    pub water_new: f64,
    pub water_price: f64,

    pub room_price: f64,
    pub service_fee: f64,
    pub other_fee: f64,

    pub total_amount: f64,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub fn electricity_cost(&self) -> f64 {
        (self.elec_new - self.elec_old) * self.elec_price
    }

    pub fn water_cost(&self) -> f64 {
        (self.water_new - self.water_old) * self.water_price
    }

    /// Room price plus metered utilities plus fees. A meter that went
    /// backwards yields a negative line item rather than an error.
    pub fn computed_total(&self) -> f64 {
        self.room_price
            + self.electricity_cost()
            + self.water_cost()
            + self.service_fee
            + self.other_fee
    }
}

/// A bill joined with whatever is left of its tenant and room.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BillWithRefs {
    #[sqlx(flatten)]
    pub bill: Bill,
    pub tenant_full_name: Option<String>,
    pub tenant_username: Option<String>,
    pub tenant_phone: Option<String>,
    pub room_name: Option<String>,
}
