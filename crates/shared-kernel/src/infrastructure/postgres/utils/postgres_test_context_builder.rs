// crates/shared-kernel/src/infrastructure/postgres/utils/postgres_test_context_builder.rs

use std::time::Duration;

use crate::infrastructure::postgres::factories::PostgresConfig;
use crate::infrastructure::postgres::utils::PostgresTestContext;

/// Base Postgres jetable. Le pool par défaut laisse assez de connexions
/// pour les tests de réclamation concurrente.
pub struct PostgresTestContextBuilder {
    pub(crate) image_tag: String,
    pub(crate) database: String,
    pub(crate) migrations: Vec<String>,
    pub(crate) config: PostgresConfig,
}

impl Default for PostgresTestContextBuilder {
    fn default() -> Self {
        Self {
            image_tag: "16-alpine".to_string(),
            database: "products_test".to_string(),
            migrations: Vec::new(),
            config: PostgresConfig {
                max_connections: 8,
                min_connections: 1,
                acquire_timeout: Duration::from_secs(10),
                idle_timeout: None,
            },
        }
    }
}

impl PostgresTestContextBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Dossier de migrations sqlx, relatif au crate qui lance le test.
    /// Appelable plusieurs fois, appliqué dans l'ordre d'ajout.
    pub fn with_migrations(mut self, path: impl Into<String>) -> Self {
        self.migrations.push(path.into());
        self
    }

    pub fn with_database(mut self, name: impl Into<String>) -> Self {
        self.database = name.into();
        self
    }

    pub fn with_image_tag(mut self, tag: impl Into<String>) -> Self {
        self.image_tag = tag.into();
        self
    }

    pub fn with_config(mut self, config: PostgresConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn build(self) -> PostgresTestContext {
        PostgresTestContext::restore(self).await
    }
}
