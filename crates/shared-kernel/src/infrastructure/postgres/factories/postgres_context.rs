// crates/shared-kernel/src/infrastructure/postgres/factories/postgres_context.rs

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::postgres::factories::{PostgresConfig, PostgresContextBuilder};

pub struct PostgresContext {
    pool: PgPool,
    url: String,
    config: PostgresConfig,
}

impl PostgresContext {
    /// Builder alimenté par `PRODUCT_DB_*`
    pub fn builder() -> AppResult<PostgresContextBuilder> {
        PostgresContextBuilder::new()
    }

    /// Builder sans lecture de l'environnement (tests)
    pub fn builder_raw() -> PostgresContextBuilder {
        PostgresContextBuilder::default()
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub(crate) async fn restore(builder: PostgresContextBuilder) -> AppResult<Self> {
        let PostgresContextBuilder { url, application_name, config } = builder;

        let mut options = PgConnectOptions::from_str(&url).map_err(|e| {
            AppError::new(ErrorCode::InternalError, format!("Invalid PRODUCT_DB_URL: {}", e))
        })?;
        if let Some(name) = &application_name {
            options = options.application_name(name);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::new(
                    ErrorCode::InfrastructureFailure,
                    format!("Postgres Connection Failed: {}", e),
                )
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            application = application_name.as_deref().unwrap_or("-"),
            "Postgres pool ready"
        );

        Ok(Self { pool, url, config })
    }
}
