// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod file_store;
pub mod json_codec;
pub mod memory_store;
