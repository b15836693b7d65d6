pub mod blob;
pub mod config;
pub mod http;
pub mod providers;
pub mod store;
