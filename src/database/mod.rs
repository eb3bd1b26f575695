pub mod assignment;
pub mod manager;
pub mod models;
pub mod query_builder;
pub mod record;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use record::{Record, RecordError, SqlValue};
pub use repository::Repository;
