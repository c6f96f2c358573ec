//! # LineTalk Core
//!
//! `no_std` engine for a line-oriented, topic-addressed messaging protocol
//! over any byte-stream transport (USB CDC, UART, TCP, a pipe).
//!
//! Messages are newline-separated JSON-style two-element arrays:
//!
//! ```text
//! ["led/-/state", true]
//! ["led-strip/-/config", {"mode": "rgb", "count": 150}]
//! ```
//!
//! ## Features
//!
//! - **no_std & heapless** - fixed buffers only, nothing allocates
//! - **Byte-at-a-time feed** - safe to re-enter from any polling loop
//! - **Drop-and-resync framing** - oversized or malformed lines cost
//!   exactly that line, never the stream
//! - **Exact-match fan-out** - every subscriber whose topic matches runs,
//!   in registration order
//! - **Typed payload access** - bool/int/string/base64/enum extraction that
//!   bound-checks before it writes
//! - **Configurable** - buffer, token and subscription capacities are const
//!   generics
//!
//! ## Limitations
//!
//! - No topic wildcards; matching is byte-exact
//! - No acknowledgements or delivery guarantees
//! - No de-registration; subscriptions live for the engine's lifetime
//!
//! ## Example
//!
//! ```rust
//! use linetalk_core::{DefaultLineTalk, IntValue, LineTalk};
//!
//! struct App {
//!     brightness: i32,
//! }
//!
//! let mut engine: DefaultLineTalk<App> = LineTalk::new();
//! let mut app = App { brightness: 0 };
//!
//! engine
//!     .subscribe("led-strip/-/brightness", |app, payload| {
//!         if let Some(IntValue::Value(value)) = payload.get_int() {
//!             app.brightness = value;
//!         }
//!     })
//!     .unwrap();
//!
//! engine.feed(&mut app, b"[\"led-strip/-/brightness\", 128]\n");
//! assert_eq!(app.brightness, 128);
//! ```

#![no_std]

pub mod engine;
pub mod error;
pub mod frame;
pub mod json;
pub mod payload;
pub mod publish;
pub mod registry;

pub use engine::{DefaultLineTalk, LineTalk};
pub use error::Error;
pub use frame::FrameAccumulator;
pub use json::{tokenize, ParseError, Token, TokenKind};
pub use payload::{IntValue, Payload, MAX_LITERAL_LENGTH};
pub use publish::Value;
pub use registry::{SubscriberFn, Subscription, SubscriptionTable};
