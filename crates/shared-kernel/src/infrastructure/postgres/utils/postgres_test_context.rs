// crates/shared-kernel/src/infrastructure/postgres/utils/postgres_test_context.rs

use crate::infrastructure::postgres::factories::PostgresContext;
use crate::infrastructure::postgres::utils::PostgresTestContextBuilder;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use std::path::Path;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres as PostgresImage;

pub struct PostgresTestContext {
    context: PostgresContext,
    _container: ContainerAsync<PostgresImage>,
}

impl PostgresTestContext {
    pub fn builder() -> PostgresTestContextBuilder {
        PostgresTestContextBuilder::new()
    }

    pub(crate) async fn restore(builder: PostgresTestContextBuilder) -> Self {
        let PostgresTestContextBuilder { image_tag, database, migrations, config } = builder;

        let container = PostgresImage::default()
            .with_db_name(&database)
            .with_tag(&image_tag)
            .start()
            .await
            .expect("Failed to start Postgres container");

        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();
        // Identifiants par défaut de l'image testcontainers
        let url = format!("postgres://postgres:postgres@{}:{}/{}", host, port, database);

        let context = PostgresContext::builder_raw()
            .with_url(&url)
            .with_application_name("product-tests")
            .with_config(config)
            .build()
            .await
            .expect("Failed to build PostgresContext for tests");

        for path in &migrations {
            let migrator = Migrator::new(Path::new(path))
                .await
                .unwrap_or_else(|e| panic!("Invalid migration path {}: {}", path, e));
            migrator
                .run(&context.pool())
                .await
                .unwrap_or_else(|e| panic!("Migrations from {} failed: {}", path, e));
        }

        Self {
            context,
            _container: container,
        }
    }

    pub fn pool(&self) -> PgPool {
        self.context.pool()
    }

    pub fn url(&self) -> &str {
        self.context.url()
    }
}
