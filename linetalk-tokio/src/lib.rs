//! # LineTalk Tokio
//!
//! Tokio runtime support for the LineTalk messaging engine.
//!
//! This crate provides the byte-stream transport and the cooperative
//! polling task for the standard library using Tokio. It re-exports all
//! types from `linetalk-core` for convenience.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use linetalk_tokio::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), TransportError> {
//!     let mut engine: DefaultLineTalk<App> = LineTalk::new();
//!     engine.subscribe("led/-/state", on_led_state).unwrap();
//!
//!     let mut transport = TcpTransport::connect("192.168.0.10:7000").await?;
//!     task::drive(&mut transport, &mut engine, &mut app).await
//! }
//! ```

pub mod task;
pub mod transport;

// Re-export core for convenience
pub use linetalk_core::*;

pub use transport::{TcpTransport, Transport, TransportError};
