pub mod config;
pub mod error;
pub mod pool;
pub mod utils;

// Re-exports for public API
pub use config::DbConnectionConfig;
pub use error::DbConnectionError;
pub use pool::{create_pool, DbPool};
pub use utils::sanitize_database_url;
