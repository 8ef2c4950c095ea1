//! Authentication Module
//!
//! User accounts and bearer tokens. Both sit behind traits so that an
//! external identity provider or token service can replace the in-process
//! implementations.

mod identity;
mod token;

pub use identity::{IdentityProvider, InMemoryIdentityProvider, User};
pub use token::{Claims, JwtTokenService, TokenKind, TokenPair, TokenService};
