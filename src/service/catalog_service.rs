use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::{
        db::DBClient,
        servicedb::{NewServiceItem, ServiceCatalogExt},
    },
    models::servicemodel::ServiceItem,
    service::error::ServiceError,
};

/// Extra services (internet, parking, ...) a contract may reference.
#[derive(Debug, Clone)]
pub struct CatalogService<S = DBClient> {
    store: Arc<S>,
}

impl<S> CatalogService<S>
where
    S: ServiceCatalogExt + Send + Sync,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn list_services(&self) -> Result<Vec<ServiceItem>, ServiceError> {
        Ok(self.store.get_services().await?)
    }

    pub async fn create_service(&self, item: NewServiceItem) -> Result<ServiceItem, ServiceError> {
        let service = self.store.save_service(item).await?;
        tracing::info!("Service {} ({}) added to the catalog", service.name, service.id);
        Ok(service)
    }

    pub async fn delete_service(&self, service_id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete_service(service_id).await? {
            return Err(ServiceError::ServiceNotFound(service_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryStore, dtos::servicedtos::CreateServiceDto,
        models::servicemodel::ServiceType,
    };

    fn item(name: &str, price: f64, service_type: ServiceType) -> NewServiceItem {
        NewServiceItem {
            name: name.to_string(),
            unit: "month".to_string(),
            price,
            service_type,
        }
    }

    #[tokio::test]
    async fn catalog_lists_by_name() {
        let store = Arc::new(MemoryStore::new());
        let service = CatalogService::new(store.clone());

        service
            .create_service(item("Parking", 100_000.0, ServiceType::Fixed))
            .await
            .unwrap();
        service
            .create_service(item("Internet", 150_000.0, ServiceType::Fixed))
            .await
            .unwrap();

        let names: Vec<String> = service
            .list_services()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Internet", "Parking"]);
    }

    #[tokio::test]
    async fn deleting_an_unknown_service_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = CatalogService::new(store.clone());

        let created = service
            .create_service(item("Laundry", 50_000.0, ServiceType::Meter))
            .await
            .unwrap();

        service.delete_service(created.id).await.unwrap();
        assert!(service.list_services().await.unwrap().is_empty());

        let err = service.delete_service(created.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::ServiceNotFound(id) if id == created.id));
    }

    #[tokio::test]
    async fn type_defaults_to_meter() {
        let store = Arc::new(MemoryStore::new());
        let service = CatalogService::new(store.clone());

        let body: CreateServiceDto =
            serde_json::from_str(r#"{"name":"Water heater","unit":"kWh","price":3000}"#).unwrap();
        let created = service.create_service(body.into()).await.unwrap();

        assert_eq!(created.service_type, ServiceType::Meter);
        assert_eq!(created.unit, "kWh");
    }
}
