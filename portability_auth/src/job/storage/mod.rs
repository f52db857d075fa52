mod config;
mod memory;
mod postgres;
mod sqlite;
mod store_type;

pub use config::job_store_from_env;
pub use memory::InMemoryJobStore;
pub use postgres::PostgresJobStore;
pub use sqlite::SqliteJobStore;
pub use store_type::JobStore;
