//! Realtime analytics over WebSocket.
//!
//! This module provides:
//! - [`RealtimeClient`], an owning handle over one connection with
//!   auto-reconnect and exponential backoff
//! - the [`Transport`] seam the client drives, with a tokio-tungstenite
//!   implementation
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐  commands   ┌──────────────────────────┐
//! │    RealtimeClient    │ ──────────▶ │  driver task             │
//! │ (one per component)  │             │  connect / read / retry  │
//! └──────────────────────┘ ◀────────── └──────────────────────────┘
//!                           snapshots              │
//!                                                  ▼
//!                                        ┌──────────────────┐
//!                                        │    Transport     │
//!                                        │ (ws / test fake) │
//!                                        └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let client = RealtimeClient::connect(&config, true);
//! let mut updates = client.subscribe();
//! while updates.changed().await.is_ok() {
//!     let visitors = updates.borrow_and_update().current_visitors;
//! }
//! ```

mod connection;
mod transport;

pub use connection::{
    ConnectionState, RealtimeClient, RealtimeOptions, RealtimeSnapshot,
};
pub use transport::{Connection, Frame, Transport, TungsteniteTransport};
