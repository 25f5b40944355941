//! # Postboard Shared
//!
//! Wire types shared between the server and any Rust client.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, Paginated};
