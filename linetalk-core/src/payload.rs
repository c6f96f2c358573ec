//! Typed payload access
//!
//! A [`Payload`] is the transient view a subscriber receives: the message
//! buffer plus the token slice covering the payload element. Accessors
//! navigate that flat token array and extract typed values without
//! allocating; every failure path returns `None` before anything is written
//! to a caller buffer.
//!
//! Keyed accessors treat the payload as a flat object and scan its key/value
//! token pairs in order; values are never containers in this protocol, so
//! the pair layout `key, value, key, value, …` always holds.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::json::{Token, TokenKind};

/// Longest accepted `get_int`/`get_enum` literal, in bytes.
pub const MAX_LITERAL_LENGTH: usize = 10;

/// Integer extracted from a payload.
///
/// The wire literal `null` is a legitimate value in this protocol (a relay
/// reports an unknown state as `null`), so it gets its own variant rather
/// than being folded into the failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntValue {
    Value(i32),
    Null,
}

/// Borrowed view over one dispatched message's payload.
///
/// Valid only for the duration of the subscriber callback it is passed to.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    buffer: &'a [u8],
    tokens: &'a [Token],
}

impl<'a> Payload<'a> {
    pub fn new(buffer: &'a [u8], tokens: &'a [Token]) -> Self {
        Self { buffer, tokens }
    }

    /// The full message buffer the tokens index into.
    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    /// The payload's token slice; token 0 is the payload value itself.
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Extract a boolean payload.
    pub fn get_bool(&self) -> Option<bool> {
        self.token_bool(self.tokens.first()?)
    }

    /// Extract a boolean from the object payload's `key` entry.
    pub fn get_key_bool(&self, key: &str) -> Option<bool> {
        self.token_bool(self.key_value(key)?)
    }

    /// Extract an integer payload.
    ///
    /// The literal `null` yields [`IntValue::Null`]. A literal containing an
    /// exponent marker (`1e2`) is parsed as a float and truncated toward
    /// zero; this mirrors the established wire behavior and is deliberate.
    pub fn get_int(&self) -> Option<IntValue> {
        self.token_int(self.tokens.first()?)
    }

    /// Extract an integer from the object payload's `key` entry.
    pub fn get_key_int(&self, key: &str) -> Option<IntValue> {
        self.token_int(self.key_value(key)?)
    }

    /// Copy a string payload into `destination`.
    ///
    /// Returns the copied length, or `None` if the payload is not a string
    /// or does not fit; `destination` is untouched on failure.
    pub fn get_string(&self, destination: &mut [u8]) -> Option<usize> {
        self.token_string(self.tokens.first()?, destination)
    }

    /// Copy a string from the object payload's `key` entry.
    pub fn get_key_string(&self, key: &str, destination: &mut [u8]) -> Option<usize> {
        self.token_string(self.key_value(key)?, destination)
    }

    /// Base64-decode a string payload into `destination`.
    ///
    /// Returns the decoded length; fails if the payload is not a string, is
    /// not valid base64, or decodes to more than `destination` holds.
    pub fn get_data(&self, destination: &mut [u8]) -> Option<usize> {
        self.token_data(self.tokens.first()?, destination)
    }

    /// Base64-decode a string from the object payload's `key` entry.
    pub fn get_key_data(&self, key: &str, destination: &mut [u8]) -> Option<usize> {
        self.token_data(self.key_value(key)?, destination)
    }

    /// Match a string payload against an ordered candidate list.
    ///
    /// Returns the zero-based index of the first candidate the payload
    /// byte-equals. The candidate slice replaces the variadic list of the
    /// wire protocol's origin; callers typically pass a `const` slice.
    pub fn get_enum(&self, candidates: &[&str]) -> Option<usize> {
        self.token_enum(self.tokens.first()?, candidates)
    }

    /// Match a string from the object payload's `key` entry against an
    /// ordered candidate list.
    pub fn get_key_enum(&self, key: &str, candidates: &[&str]) -> Option<usize> {
        self.token_enum(self.key_value(key)?, candidates)
    }

    /// Locate the value token for `key` in a flat object payload.
    ///
    /// Token 0 must be the object; pairs sit at `(1, 2), (3, 4), …`. First
    /// byte-exact key match wins.
    fn key_value(&self, key: &str) -> Option<&'a Token> {
        if self.tokens.first()?.kind != TokenKind::Object {
            return None;
        }

        let mut index = 1;
        while index + 1 < self.tokens.len() {
            if self.tokens[index].span(self.buffer) == key.as_bytes() {
                return Some(&self.tokens[index + 1]);
            }
            index += 2;
        }

        None
    }

    fn token_bool(&self, token: &Token) -> Option<bool> {
        match token.span(self.buffer) {
            b"true" => Some(true),
            b"false" => Some(false),
            _ => None,
        }
    }

    fn token_int(&self, token: &Token) -> Option<IntValue> {
        if token.kind != TokenKind::Primitive {
            return None;
        }

        let span = token.span(self.buffer);
        if span.len() > MAX_LITERAL_LENGTH {
            return None;
        }
        let literal = core::str::from_utf8(span).ok()?;

        if literal == "null" {
            return Some(IntValue::Null);
        }

        if literal.contains('e') {
            let value: f32 = literal.parse().ok()?;
            return Some(IntValue::Value(value as i32));
        }

        literal.parse::<i32>().ok().map(IntValue::Value)
    }

    fn token_string(&self, token: &Token, destination: &mut [u8]) -> Option<usize> {
        if token.kind != TokenKind::String {
            return None;
        }

        let span = token.span(self.buffer);
        if span.len() > destination.len() {
            return None;
        }

        destination[..span.len()].copy_from_slice(span);
        Some(span.len())
    }

    fn token_data(&self, token: &Token, destination: &mut [u8]) -> Option<usize> {
        if token.kind != TokenKind::String {
            return None;
        }

        BASE64.decode_slice(token.span(self.buffer), destination).ok()
    }

    fn token_enum(&self, token: &Token, candidates: &[&str]) -> Option<usize> {
        if token.kind != TokenKind::String {
            return None;
        }

        let span = token.span(self.buffer);
        if span.len() > MAX_LITERAL_LENGTH {
            return None;
        }

        candidates
            .iter()
            .position(|candidate| candidate.as_bytes() == span)
    }
}
