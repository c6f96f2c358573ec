//! Message validation and routing
//!
//! [`LineTalk`] bundles the frame accumulator and the subscription table
//! into the one owned engine value a transport task feeds bytes into.
//! Every completed line is tokenized, checked against the
//! `["topic", payload]` shape and fanned out to the matching subscribers
//! within the same call; anything that fails a check is dropped silently.

use crate::error::Error;
use crate::frame::FrameAccumulator;
use crate::json::{self, Token, TokenKind};
use crate::payload::Payload;
use crate::registry::{SubscriberFn, SubscriptionTable};

/// Token index of the root array in a tokenized message.
const TOKEN_ROOT: usize = 0;
/// Token index of the topic string.
const TOKEN_TOPIC: usize = 1;
/// Token index where the payload begins.
const TOKEN_PAYLOAD: usize = 2;

/// Line-oriented, topic-addressed messaging engine.
///
/// `C` is the caller-owned context handed to every subscriber callback;
/// the const parameters fix the frame buffer size, the tokenizer capacity
/// and the subscription table capacity at compile time.
pub struct LineTalk<
    C,
    const RX_BUFFER_SIZE: usize,
    const MAX_TOKENS: usize,
    const MAX_SUBSCRIPTIONS: usize,
> {
    rx: FrameAccumulator<RX_BUFFER_SIZE>,
    subscriptions: SubscriptionTable<C, MAX_SUBSCRIPTIONS>,
}

/// Engine with the reference sizing: 1 KiB frames, 16 tokens,
/// 16 subscriptions.
pub type DefaultLineTalk<C> = LineTalk<C, 1024, 16, 16>;

impl<C, const RX_BUFFER_SIZE: usize, const MAX_TOKENS: usize, const MAX_SUBSCRIPTIONS: usize>
    LineTalk<C, RX_BUFFER_SIZE, MAX_TOKENS, MAX_SUBSCRIPTIONS>
{
    pub const fn new() -> Self {
        Self {
            rx: FrameAccumulator::new(),
            subscriptions: SubscriptionTable::new(),
        }
    }

    /// Bind `callback` to an exact-match topic.
    ///
    /// Subscriptions are expected to be registered once during setup;
    /// there is no de-registration.
    pub fn subscribe(
        &mut self,
        topic: &'static str,
        callback: SubscriberFn<C>,
    ) -> Result<(), Error> {
        self.subscriptions.subscribe(topic, callback)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Consume one byte of transport input, routing any line it completes.
    ///
    /// Dispatch happens synchronously inside this call: by the time it
    /// returns, every subscriber matching a completed message has run.
    pub fn feed_byte(&mut self, context: &mut C, byte: u8) {
        if let Some(message) = self.rx.feed(byte) {
            Self::route(&self.subscriptions, message, context);
        }
    }

    /// Feed a chunk of transport input byte-by-byte.
    pub fn feed(&mut self, context: &mut C, bytes: &[u8]) {
        for &byte in bytes {
            self.feed_byte(context, byte);
        }
    }

    /// Validate one completed line and fan it out.
    ///
    /// A message survives only if it tokenizes within `MAX_TOKENS`, has at
    /// least three tokens, its root is a two-element array, and its first
    /// element is a childless string (the topic). Everything else is noise.
    fn route(
        subscriptions: &SubscriptionTable<C, MAX_SUBSCRIPTIONS>,
        message: &[u8],
        context: &mut C,
    ) {
        let mut tokens = [Token::default(); MAX_TOKENS];

        let count = match json::tokenize(message, &mut tokens) {
            Ok(count) => count,
            Err(_) => return,
        };

        if count < TOKEN_PAYLOAD + 1 {
            return;
        }

        if tokens[TOKEN_ROOT].kind != TokenKind::Array || tokens[TOKEN_ROOT].children != 2 {
            return;
        }

        if tokens[TOKEN_TOPIC].kind != TokenKind::String || tokens[TOKEN_TOPIC].children != 0 {
            return;
        }

        let payload = Payload::new(message, &tokens[TOKEN_PAYLOAD..count]);
        subscriptions.dispatch(tokens[TOKEN_TOPIC].span(message), &payload, context);
    }
}

impl<C, const RX_BUFFER_SIZE: usize, const MAX_TOKENS: usize, const MAX_SUBSCRIPTIONS: usize>
    Default for LineTalk<C, RX_BUFFER_SIZE, MAX_TOKENS, MAX_SUBSCRIPTIONS>
{
    fn default() -> Self {
        Self::new()
    }
}
