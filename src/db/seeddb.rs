use async_trait::async_trait;

use crate::db::db::DBClient;

#[async_trait]
pub trait SeedExt {
    /// Removes every user, room, contract and bill.
    async fn clear_all(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl SeedExt for DBClient {
    async fn clear_all(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for table in ["bills", "contracts", "users", "rooms"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
