//! Cooperative polling task
//!
//! Drives a [`Transport`] into a [`LineTalk`] engine: read whatever the
//! transport has, feed it byte-by-byte (dispatching subscribers inline),
//! and yield at the await point. The engine never owns a loop of its own,
//! so the same core runs unchanged under any scheduler that can call
//! `feed`.

use linetalk_core::{Error, LineTalk};

use crate::transport::{Transport, TransportError};

/// Read chunk size for each poll of the transport.
pub const READ_CHUNK_SIZE: usize = 16;

/// Feed transport input into the engine until the stream ends.
///
/// Subscriber callbacks run inside this future between reads; they must not
/// block. Returns once the transport reports end-of-stream, or with the
/// first I/O error.
pub async fn drive<T, C, const RX: usize, const TOKENS: usize, const SUBS: usize>(
    transport: &mut T,
    engine: &mut LineTalk<C, RX, TOKENS, SUBS>,
    context: &mut C,
) -> Result<(), TransportError>
where
    T: Transport,
{
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let length = transport.read(&mut chunk).await?;
        if length == 0 {
            log::debug!("transport closed, stopping poll task");
            return Ok(());
        }

        engine.feed(context, &chunk[..length]);
    }
}

/// Encode an outbound message with `encode` and write it to the transport.
///
/// Convenience glue between `linetalk_core::publish` and a [`Transport`]:
///
/// ```ignore
/// send(&mut transport, &mut [0u8; 256], |buffer| {
///     publish::encode_bool("led/-/state", true, buffer)
/// })
/// .await?;
/// ```
pub async fn send<T>(
    transport: &mut T,
    buffer: &mut [u8],
    encode: impl FnOnce(&mut [u8]) -> Result<usize, Error>,
) -> Result<(), TransportError>
where
    T: Transport,
{
    let length = encode(buffer).map_err(|_| TransportError::Encode)?;
    transport.write(&buffer[..length]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use linetalk_core::{publish, DefaultLineTalk, IntValue};
    use std::collections::VecDeque;

    /// Transport fed from a script of read chunks; captures writes.
    struct ScriptedTransport {
        reads: VecDeque<Vec<u8>>,
        written: Vec<u8>,
    }

    impl ScriptedTransport {
        fn new(reads: &[&[u8]]) -> Self {
            Self {
                reads: reads.iter().map(|chunk| chunk.to_vec()).collect(),
                written: Vec::new(),
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn read(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
            match self.reads.pop_front() {
                Some(chunk) => {
                    // The scripted chunks are smaller than any read buffer
                    // the driver uses.
                    buffer[..chunk.len()].copy_from_slice(&chunk);
                    Ok(chunk.len())
                }
                None => Ok(0),
            }
        }

        async fn write(&mut self, buffer: &[u8]) -> Result<(), TransportError> {
            self.written.extend_from_slice(buffer);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Captured {
        ints: Vec<IntValue>,
    }

    #[tokio::test]
    async fn test_drive_feeds_engine_until_eof() {
        let mut engine: DefaultLineTalk<Captured> = DefaultLineTalk::new();
        engine
            .subscribe("x", |captured, payload| {
                if let Some(value) = payload.get_int() {
                    captured.ints.push(value);
                }
            })
            .unwrap();

        // Frames split across reads at awkward boundaries.
        let mut transport = ScriptedTransport::new(&[
            b"[\"x\", 1]\n[\"x\"",
            b", 2]",
            b"\n",
            b"[\"other\", 3]\n",
        ]);
        let mut captured = Captured::default();

        drive(&mut transport, &mut engine, &mut captured)
            .await
            .unwrap();

        assert_eq!(
            captured.ints,
            vec![IntValue::Value(1), IntValue::Value(2)]
        );
    }

    #[tokio::test]
    async fn test_send_writes_encoded_message() {
        let mut transport = ScriptedTransport::new(&[]);
        let mut buffer = [0u8; 64];

        send(&mut transport, &mut buffer, |buffer| {
            publish::encode_int("counter", 7, buffer)
        })
        .await
        .unwrap();

        assert_eq!(transport.written, b"[\"counter\", 7]\n");
    }
}
