//! API Module
//!
//! HTTP handlers and routing for the inventory REST API.
//!
//! # Endpoints
//! - `POST /register` - Create a user account
//! - `POST /login` - Exchange credentials for an access/refresh token pair
//! - `POST /token/refresh` - Exchange a refresh token for an access token
//! - `POST /items` - Create an item
//! - `GET /items/all` - List all items
//! - `GET /items/:id` - Fetch one item through the cache
//! - `PUT /items/:id/update` - Update an item
//! - `DELETE /items/:id/delete` - Delete an item
//! - `GET /cache/stats` - Item cache counters
//! - `GET /health` - Health check endpoint
//!
//! Item endpoints require an access token.

pub mod auth;
pub mod handlers;
pub mod routes;
mod state;

pub use auth::{login_handler, refresh_handler, register_handler, AuthUser};
pub use handlers::*;
pub use routes::create_router;
pub use state::AppState;
