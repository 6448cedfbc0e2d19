// Service exports
pub mod cache;
pub mod datastore;

pub use cache::ProfileCache;
pub use datastore::{DataStoreClient, DataStoreError, DataStoreTables};
