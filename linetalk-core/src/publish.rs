//! Outbound message formatting
//!
//! Encodes complete `["topic", payload]` lines, terminator included, into a
//! caller-supplied buffer; the caller hands the bytes to its transport's
//! write primitive. Values are not JSON-escaped: topics and string payloads
//! on this wire are plain ASCII identifiers and base64 text, neither of
//! which contains quotes or control characters.

use core::fmt::{self, Write as _};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::Error;

/// Scalar payload value for object encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    Int(i32),
    String(&'a str),
    Null,
}

/// Encode `["topic", true|false]`.
pub fn encode_bool(topic: &str, value: bool, destination: &mut [u8]) -> Result<usize, Error> {
    encode_with(destination, |writer| {
        write!(writer, "[\"{}\", {}]\n", topic, value)
    })
}

/// Encode `["topic", <int>]`.
pub fn encode_int(topic: &str, value: i32, destination: &mut [u8]) -> Result<usize, Error> {
    encode_with(destination, |writer| {
        write!(writer, "[\"{}\", {}]\n", topic, value)
    })
}

/// Encode `["topic", <float>]` with a fixed number of decimals.
pub fn encode_float(
    topic: &str,
    value: f32,
    decimals: usize,
    destination: &mut [u8],
) -> Result<usize, Error> {
    encode_with(destination, |writer| {
        write!(writer, "[\"{}\", {:.*}]\n", topic, decimals, value)
    })
}

/// Encode `["topic", null]`.
pub fn encode_null(topic: &str, destination: &mut [u8]) -> Result<usize, Error> {
    encode_with(destination, |writer| write!(writer, "[\"{}\", null]\n", topic))
}

/// Encode `["topic", "value"]`.
pub fn encode_string(topic: &str, value: &str, destination: &mut [u8]) -> Result<usize, Error> {
    encode_with(destination, |writer| {
        write!(writer, "[\"{}\", \"{}\"]\n", topic, value)
    })
}

/// Encode `["topic", "<base64 of data>"]`.
pub fn encode_data(topic: &str, data: &[u8], destination: &mut [u8]) -> Result<usize, Error> {
    let capacity = destination.len();
    let mut writer = SliceWriter::new(destination);

    write!(writer, "[\"{}\", \"", topic)
        .map_err(|_| Error::TxBufferTooSmall { capacity })?;

    let encoded = BASE64
        .encode_slice(data, writer.remaining())
        .map_err(|_| Error::TxBufferTooSmall { capacity })?;
    writer.advance(encoded);

    writer
        .write_str("\"]\n")
        .map_err(|_| Error::TxBufferTooSmall { capacity })?;

    Ok(writer.len())
}

/// Encode `["topic", {"key": value, …}]` from an ordered pair list.
pub fn encode_object(
    topic: &str,
    pairs: &[(&str, Value<'_>)],
    destination: &mut [u8],
) -> Result<usize, Error> {
    encode_with(destination, |writer| {
        write!(writer, "[\"{}\", {{", topic)?;
        for (index, (key, value)) in pairs.iter().enumerate() {
            if index > 0 {
                writer.write_str(", ")?;
            }
            write!(writer, "\"{}\": ", key)?;
            match value {
                Value::Bool(true) => writer.write_str("true")?,
                Value::Bool(false) => writer.write_str("false")?,
                Value::Int(number) => write!(writer, "{}", number)?,
                Value::String(text) => write!(writer, "\"{}\"", text)?,
                Value::Null => writer.write_str("null")?,
            }
        }
        writer.write_str("}]\n")
    })
}

fn encode_with(
    destination: &mut [u8],
    format: impl FnOnce(&mut SliceWriter<'_>) -> fmt::Result,
) -> Result<usize, Error> {
    let capacity = destination.len();
    let mut writer = SliceWriter::new(destination);
    format(&mut writer).map_err(|_| Error::TxBufferTooSmall { capacity })?;
    Ok(writer.len())
}

/// `core::fmt::Write` over a fixed byte buffer; errors instead of
/// truncating when the buffer runs out.
struct SliceWriter<'a> {
    buffer: &'a mut [u8],
    length: usize,
}

impl<'a> SliceWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, length: 0 }
    }

    fn len(&self) -> usize {
        self.length
    }

    fn remaining(&mut self) -> &mut [u8] {
        &mut self.buffer[self.length..]
    }

    fn advance(&mut self, count: usize) {
        self.length += count;
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        let bytes = text.as_bytes();
        if self.length + bytes.len() > self.buffer.len() {
            return Err(fmt::Error);
        }
        self.buffer[self.length..self.length + bytes.len()].copy_from_slice(bytes);
        self.length += bytes.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(result: Result<usize, Error>, buffer: &[u8]) -> &str {
        let length = result.unwrap();
        core::str::from_utf8(&buffer[..length]).unwrap()
    }

    #[test]
    fn test_encode_bool() {
        let mut buffer = [0u8; 64];
        let result = encode_bool("led/-/state", true, &mut buffer);
        assert_eq!(encoded(result, &buffer), "[\"led/-/state\", true]\n");
    }

    #[test]
    fn test_encode_int() {
        let mut buffer = [0u8; 64];
        let result = encode_int("push-button/-/event-count", -3, &mut buffer);
        assert_eq!(
            encoded(result, &buffer),
            "[\"push-button/-/event-count\", -3]\n"
        );
    }

    #[test]
    fn test_encode_float_fixed_decimals() {
        let mut buffer = [0u8; 64];
        let result = encode_float("thermometer/0:0/temperature", 21.5, 2, &mut buffer);
        assert_eq!(
            encoded(result, &buffer),
            "[\"thermometer/0:0/temperature\", 21.50]\n"
        );
    }

    #[test]
    fn test_encode_null() {
        let mut buffer = [0u8; 64];
        let result = encode_null("relay/0:0/state", &mut buffer);
        assert_eq!(encoded(result, &buffer), "[\"relay/0:0/state\", null]\n");
    }

    #[test]
    fn test_encode_string() {
        let mut buffer = [0u8; 64];
        let result = encode_string("led-strip/-/mode", "rainbow", &mut buffer);
        assert_eq!(encoded(result, &buffer), "[\"led-strip/-/mode\", \"rainbow\"]\n");
    }

    #[test]
    fn test_encode_data_is_base64() {
        let mut buffer = [0u8; 64];
        let result = encode_data("frame", b"hello", &mut buffer);
        assert_eq!(encoded(result, &buffer), "[\"frame\", \"aGVsbG8=\"]\n");
    }

    #[test]
    fn test_encode_object() {
        let mut buffer = [0u8; 96];
        let result = encode_object(
            "led-strip/-/config",
            &[("mode", Value::String("rgb")), ("count", Value::Int(150))],
            &mut buffer,
        );
        assert_eq!(
            encoded(result, &buffer),
            "[\"led-strip/-/config\", {\"mode\": \"rgb\", \"count\": 150}]\n"
        );
    }

    #[test]
    fn test_buffer_too_small() {
        let mut buffer = [0u8; 8];
        assert_eq!(
            encode_string("topic", "value", &mut buffer),
            Err(Error::TxBufferTooSmall { capacity: 8 })
        );
    }

    #[test]
    fn test_data_buffer_too_small() {
        let mut buffer = [0u8; 12];
        assert_eq!(
            encode_data("frame", b"hello world", &mut buffer),
            Err(Error::TxBufferTooSmall { capacity: 12 })
        );
    }
}
