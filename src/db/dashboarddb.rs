use async_trait::async_trait;

use crate::{db::db::DBClient, models::roommodel::RoomStatus};

#[async_trait]
pub trait DashboardExt {
    /// Counts rooms, optionally only those in `status`.
    async fn count_rooms(&self, status: Option<RoomStatus>) -> Result<i64, sqlx::Error>;

    async fn count_bills(&self, is_paid: bool) -> Result<i64, sqlx::Error>;

    /// Sum of `total_amount`; zero when nothing matches.
    async fn sum_bill_totals(&self, is_paid: bool) -> Result<f64, sqlx::Error>;
}

#[async_trait]
impl DashboardExt for DBClient {
    async fn count_rooms(&self, status: Option<RoomStatus>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM rooms WHERE ($1::room_status IS NULL OR status = $1)"#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_bills(&self, is_paid: bool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM bills WHERE is_paid = $1"#)
            .bind(is_paid)
            .fetch_one(&self.pool)
            .await
    }

    async fn sum_bill_totals(&self, is_paid: bool) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            r#"SELECT COALESCE(SUM(total_amount), 0)::DOUBLE PRECISION FROM bills WHERE is_paid = $1"#,
        )
        .bind(is_paid)
        .fetch_one(&self.pool)
        .await
    }
}
