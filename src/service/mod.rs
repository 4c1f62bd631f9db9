pub mod bill_service;
pub mod catalog_service;
pub mod contract_service;
pub mod dashboard_service;
pub mod error;
pub mod room_service;
pub mod seed_service;
pub mod tenant_service;
