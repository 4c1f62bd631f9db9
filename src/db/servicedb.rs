use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::db::DBClient,
    models::servicemodel::{ServiceItem, ServiceType},
};

#[derive(Debug, Clone)]
pub struct NewServiceItem {
    pub name: String,
    pub unit: String,
    pub price: f64,
    pub service_type: ServiceType,
}

#[async_trait]
pub trait ServiceCatalogExt {
    async fn get_services(&self) -> Result<Vec<ServiceItem>, sqlx::Error>;

    async fn save_service(&self, item: NewServiceItem) -> Result<ServiceItem, sqlx::Error>;

    async fn delete_service(&self, service_id: Uuid) -> Result<bool, sqlx::Error>;
}

#[async_trait]
impl ServiceCatalogExt for DBClient {
    async fn get_services(&self) -> Result<Vec<ServiceItem>, sqlx::Error> {
        sqlx::query_as::<_, ServiceItem>(r#"SELECT * FROM services ORDER BY name ASC"#)
            .fetch_all(&self.pool)
            .await
    }

    async fn save_service(&self, item: NewServiceItem) -> Result<ServiceItem, sqlx::Error> {
        sqlx::query_as::<_, ServiceItem>(
            r#"
            INSERT INTO services (id, name, unit, price, service_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(item.name)
        .bind(item.unit)
        .bind(item.price)
        .bind(item.service_type)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_service(&self, service_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(service_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
