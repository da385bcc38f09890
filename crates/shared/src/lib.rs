//! Shared types and utilities for the maicivy client and dev server.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::*;
pub use models::*;
pub use protocol::*;
