mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use anyhow::Context;
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use db::db::DBClient;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use service::{
    bill_service::{BillService, UnitPrices},
    catalog_service::CatalogService,
    contract_service::ContractService,
    dashboard_service::DashboardService,
    room_service::RoomService,
    seed_service::seed_demo_data,
    tenant_service::TenantService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub bill_service: Arc<BillService>,
    pub catalog_service: Arc<CatalogService>,
    pub contract_service: Arc<ContractService>,
    pub dashboard_service: Arc<DashboardService>,
    pub room_service: Arc<RoomService>,
    pub tenant_service: Arc<TenantService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client = Arc::new(db_client);

        let unit_prices = UnitPrices {
            electricity: config.electric_unit_price,
            water: config.water_unit_price,
        };

        Self {
            bill_service: Arc::new(BillService::new(db_client.clone(), unit_prices)),
            catalog_service: Arc::new(CatalogService::new(db_client.clone())),
            contract_service: Arc::new(ContractService::new(db_client.clone())),
            dashboard_service: Arc::new(DashboardService::new(db_client.clone())),
            room_service: Arc::new(RoomService::new(db_client.clone())),
            tenant_service: Arc::new(TenantService::new(
                db_client.clone(),
                config.default_tenant_password.clone(),
            )),
            db_client,
            env: config,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    tracing::info!("Connection to the database is successful");

    let db_client = DBClient::new(pool);
    db_client
        .migrate()
        .await
        .context("Failed to run database migrations")?;

    if config.seed_demo_data {
        seed_demo_data(&db_client, &config.default_tenant_password)
            .await
            .context("Failed to seed demo data")?;
    }

    let allowed_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    let app_state = Arc::new(AppState::new(db_client, config.clone()));

    let app = create_router(app_state).layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    tracing::info!("Server is running on http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
