//! Tokio transport implementations
//!
//! The engine only needs two primitives from a transport: read whatever is
//! currently available and write a buffer. This module defines that
//! contract and wraps Tokio's TCP stream in it; any other byte stream (a
//! serial port, a pipe) fits behind the same trait.

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Failed to establish the connection
    Connect,
    /// I/O error on read or write
    Io,
    /// Peer closed the stream
    Closed,
    /// Outbound message failed to encode
    Encode,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Connect => write!(f, "Failed to establish connection"),
            TransportError::Io => write!(f, "I/O error"),
            TransportError::Closed => write!(f, "Peer closed the stream"),
            TransportError::Encode => write!(f, "Outbound message failed to encode"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Byte-stream transport the polling task drives.
#[async_trait]
pub trait Transport {
    /// Read available bytes into `buffer`, returning how many were read.
    /// Zero means the stream has ended.
    async fn read(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError>;

    /// Write all of `buffer` to the stream.
    async fn write(&mut self, buffer: &[u8]) -> Result<(), TransportError>;
}

/// Tokio TCP stream wrapper.
pub struct TcpTransport {
    inner: tokio::net::TcpStream,
}

impl TcpTransport {
    /// Connect to a remote endpoint.
    pub async fn connect(address: &str) -> Result<Self, TransportError> {
        let stream = tokio::net::TcpStream::connect(address)
            .await
            .map_err(|_| TransportError::Connect)?;
        log::info!("connected to {}", address);

        Ok(Self { inner: stream })
    }

    /// Wrap an already-accepted stream.
    pub fn from_tcp_stream(stream: tokio::net::TcpStream) -> Self {
        Self { inner: stream }
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn read(&mut self, buffer: &mut [u8]) -> Result<usize, TransportError> {
        self.inner.read(buffer).await.map_err(|_| TransportError::Io)
    }

    async fn write(&mut self, buffer: &[u8]) -> Result<(), TransportError> {
        self.inner
            .write_all(buffer)
            .await
            .map_err(|_| TransportError::Io)
    }
}
