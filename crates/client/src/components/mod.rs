//! UI components built on the client hooks.

pub mod access_gate;
pub mod live_visitors;
pub mod theme_stats;
pub mod ui;

pub use access_gate::*;
pub use live_visitors::*;
pub use theme_stats::*;
