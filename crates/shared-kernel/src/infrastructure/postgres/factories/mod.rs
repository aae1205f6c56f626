// crates/shared-kernel/src/infrastructure/postgres/factories/mod.rs

mod postgres_config;
mod postgres_context;
mod postgres_context_builder;

pub use postgres_config::PostgresConfig;
pub use postgres_context::PostgresContext;
pub use postgres_context_builder::PostgresContextBuilder;
