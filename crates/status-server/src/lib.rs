//! Status board server: HTTP API plus real-time observer channels.

pub mod api;
pub mod error;
pub mod state;
pub mod websocket;
