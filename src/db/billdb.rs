use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::billmodel::{Bill, BillWithRefs},
};

const BILL_WITH_REFS_SELECT: &str = r#"
    SELECT b.*,
        u.full_name AS tenant_full_name,
        u.username AS tenant_username,
        u.phone AS tenant_phone,
        r.name AS room_name
    FROM bills b
    LEFT JOIN users u ON u.id = b.tenant_id
    LEFT JOIN rooms r ON r.id = b.room_id
"#;

#[async_trait]
pub trait BillExt {
    /// Every bill, newest period first.
    async fn get_bills(&self) -> Result<Vec<BillWithRefs>, sqlx::Error>;

    async fn get_tenant_bills(&self, tenant_id: Uuid) -> Result<Vec<BillWithRefs>, sqlx::Error>;

    async fn save_bill(&self, bill: &Bill) -> Result<Bill, sqlx::Error>;

    async fn update_bill_paid(
        &self,
        bill_id: Uuid,
        is_paid: bool,
    ) -> Result<Option<Bill>, sqlx::Error>;

    async fn delete_bill(&self, bill_id: Uuid) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl BillExt for DBClient {
    async fn get_bills(&self) -> Result<Vec<BillWithRefs>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY b.year DESC, b.month DESC, b.created_at DESC",
            BILL_WITH_REFS_SELECT
        );

        sqlx::query_as::<_, BillWithRefs>(&query)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_tenant_bills(&self, tenant_id: Uuid) -> Result<Vec<BillWithRefs>, sqlx::Error> {
        let query = format!(
            "{} WHERE b.tenant_id = $1 ORDER BY b.year DESC, b.month DESC",
            BILL_WITH_REFS_SELECT
        );

        sqlx::query_as::<_, BillWithRefs>(&query)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn save_bill(&self, bill: &Bill) -> Result<Bill, sqlx::Error> {
        sqlx::query_as::<_, Bill>(
            r#"
            INSERT INTO bills (
                id, tenant_id, room_id, month, year,
                elec_old, elec_new, elec_price,
                water_old, water_new, water_price,
                room_price, service_fee, other_fee,
                total_amount, is_paid, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(bill.id)
        .bind(bill.tenant_id)
        .bind(bill.room_id)
        .bind(bill.month)
        .bind(bill.year)
        .bind(bill.elec_old)
        .bind(bill.elec_new)
        .bind(bill.elec_price)
        .bind(bill.water_old)
        .bind(bill.water_new)
        .bind(bill.water_price)
        .bind(bill.room_price)
        .bind(bill.service_fee)
        .bind(bill.other_fee)
        .bind(bill.total_amount)
        .bind(bill.is_paid)
        .bind(bill.created_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_bill_paid(
        &self,
        bill_id: Uuid,
        is_paid: bool,
    ) -> Result<Option<Bill>, sqlx::Error> {
        sqlx::query_as::<_, Bill>(
            r#"
            UPDATE bills SET is_paid = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(bill_id)
        .bind(is_paid)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_bill(&self, bill_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM bills WHERE id = $1")
            .bind(bill_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
