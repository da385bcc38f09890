//! HTTP route handlers, one module per data domain.

pub mod analytics;
pub mod cv;
pub mod github;
pub mod letters;
pub mod profile;
pub mod timeline;
pub mod visitors;
