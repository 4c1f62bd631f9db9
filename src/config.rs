use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // Fallback utility prices used when a bill request omits them
    pub electric_unit_price: f64,
    pub water_unit_price: f64,
    pub default_tenant_password: String,
    pub cors_origins: Vec<String>,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn init() -> anyhow::Result<Config> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET_KEY").context("JWT_SECRET_KEY must be set")?;

        let jwt_maxage = env_or("JWT_MAXAGE", "43200")
            .parse::<i64>()
            .context("JWT_MAXAGE must be a number of minutes")?;
        let port = env_or("PORT", "8000")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let electric_unit_price = env_or("ELECTRIC_UNIT_PRICE", "3500")
            .parse::<f64>()
            .context("ELECTRIC_UNIT_PRICE must be a number")?;
        let water_unit_price = env_or("WATER_UNIT_PRICE", "20000")
            .parse::<f64>()
            .context("WATER_UNIT_PRICE must be a number")?;

        let default_tenant_password = env_or("DEFAULT_TENANT_PASSWORD", "123456");

        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let seed_demo_data = env_or("SEED_DEMO_DATA", "false")
            .parse::<bool>()
            .context("SEED_DEMO_DATA must be true or false")?;

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_maxage,
            port,
            electric_unit_price,
            water_unit_price,
            default_tenant_password,
            cors_origins,
            seed_demo_data,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
