pub mod blob_store;
pub mod memory;
pub mod record_store;
pub mod resource;
