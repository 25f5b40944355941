//! # Postboard Core
//!
//! The domain layer of the posts backend.
//! This crate contains the Post entity, its field schema, the feed types,
//! the repository ports and the service that drives them. It has zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::{LikeState, PostService};
