//! Inventory API - Inventory management REST service
//!
//! Item CRUD behind bearer-token authentication, with a read-through item
//! cache that is invalidated on every mutation.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::ItemCache;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
