//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - User records, keyed by database-generated UUIDs
//!
//! Schema lives in `migrations/` and is applied with [`MIGRATOR`].

mod user_repository;

pub use user_repository::PostgresUserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
