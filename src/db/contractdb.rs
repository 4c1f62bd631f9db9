use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::contractmodel::{Contract, ContractStatus},
};

#[async_trait]
pub trait ContractExt {
    async fn save_contract(&self, contract: &Contract) -> Result<Contract, sqlx::Error>;

    async fn get_contract(&self, contract_id: Uuid) -> Result<Option<Contract>, sqlx::Error>;

    async fn get_contracts(&self) -> Result<Vec<Contract>, sqlx::Error>;

    async fn get_active_contract(&self, tenant_id: Uuid) -> Result<Option<Contract>, sqlx::Error>;

    async fn update_contract_status(
        &self,
        contract_id: Uuid,
        status: ContractStatus,
    ) -> Result<Option<Contract>, sqlx::Error>;

    /// Moves an ACTIVE contract to TERMINATED. `None` when the contract is
    /// missing or no longer active.
    async fn terminate_active_contract(
        &self,
        contract_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error>;

    async fn room_has_active_contract(&self, room_id: Uuid) -> Result<bool, sqlx::Error>;

    async fn delete_contract(&self, contract_id: Uuid) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl ContractExt for DBClient {
    async fn save_contract(&self, contract: &Contract) -> Result<Contract, sqlx::Error> {
        sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts (
                id, room_id, tenant_id, start_date, end_date, rental_price,
                deposit_amount, number_of_tenants, status, service_ids, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(contract.id)
        .bind(contract.room_id)
        .bind(contract.tenant_id)
        .bind(contract.start_date)
        .bind(contract.end_date)
        .bind(contract.rental_price)
        .bind(contract.deposit_amount)
        .bind(contract.number_of_tenants)
        .bind(contract.status)
        .bind(&contract.service_ids)
        .bind(contract.created_at)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_contract(&self, contract_id: Uuid) -> Result<Option<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(r#"SELECT * FROM contracts WHERE id = $1"#)
            .bind(contract_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_contracts(&self) -> Result<Vec<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(r#"SELECT * FROM contracts ORDER BY created_at DESC"#)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_active_contract(&self, tenant_id: Uuid) -> Result<Option<Contract>, sqlx::Error> {
        // Several ACTIVE rows can exist for one tenant; the newest wins.
        sqlx::query_as::<_, Contract>(
            r#"
            SELECT * FROM contracts
            WHERE tenant_id = $1 AND status = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(tenant_id)
        .bind(ContractStatus::Active)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_contract_status(
        &self,
        contract_id: Uuid,
        status: ContractStatus,
    ) -> Result<Option<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts SET status = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(contract_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    async fn terminate_active_contract(
        &self,
        contract_id: Uuid,
    ) -> Result<Option<Contract>, sqlx::Error> {
        sqlx::query_as::<_, Contract>(
            r#"
            UPDATE contracts SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(contract_id)
        .bind(ContractStatus::Active)
        .bind(ContractStatus::Terminated)
        .fetch_optional(&self.pool)
        .await
    }

    async fn room_has_active_contract(&self, room_id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM contracts WHERE room_id = $1 AND status = $2)"#,
        )
        .bind(room_id)
        .bind(ContractStatus::Active)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_contract(&self, contract_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(contract_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
