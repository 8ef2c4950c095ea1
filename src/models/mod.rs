//! Domain model and request/response DTOs for the inventory API
//!
//! `Item` is the stored record; the request and response types define the
//! bodies of HTTP requests and responses.

pub mod item;
pub mod requests;
pub mod responses;

pub use item::{Item, ItemId, NewItem};
pub use requests::{
    CreateItemRequest, LoginRequest, RefreshRequest, RegisterRequest, UpdateItemRequest,
};
pub use responses::{
    AccessTokenResponse, ErrorResponse, HealthResponse, MessageResponse, TokenPairResponse,
};
