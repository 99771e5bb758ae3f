//! Bounded chunk reads reconciled with the carryover slot.

use bytes::BytesMut;
use log::trace;
use tokio::io::{AsyncBufRead, AsyncReadExt};

use super::buffer::Carryover;
use super::decode::Utf8Decoder;
use crate::error::{ChannelError, Result};

/// Default upper bound on the size of one raw read, in bytes.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 4096;

/// Configuration for reader behavior.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Maximum number of bytes pulled from the stream by one raw read.
    pub max_chunk_size: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

/// Reader over a child's output stream.
///
/// Every piece of output reaches the caller through [`read_chunk`](Self::read_chunk)
/// or the line reader, both of which drain the carryover slot before touching
/// the stream. Line assembly and pattern skipping live in sibling modules.
pub struct ChunkReader<R> {
    stream: R,
    pub(crate) carryover: Carryover,
    pub(crate) decoder: Utf8Decoder,
    buf: BytesMut,
    max_chunk_size: usize,
}

impl<R: AsyncBufRead + Unpin> ChunkReader<R> {
    /// Create a reader with the given configuration.
    pub fn new(stream: R, config: ChannelConfig) -> Self {
        let max_chunk_size = config.max_chunk_size.max(1);
        Self {
            stream,
            carryover: Carryover::new(),
            decoder: Utf8Decoder::default(),
            buf: BytesMut::zeroed(max_chunk_size),
            max_chunk_size,
        }
    }

    /// Create a reader with default configuration.
    pub fn with_defaults(stream: R) -> Self {
        Self::new(stream, ChannelConfig::default())
    }

    /// Return the next chunk of output.
    ///
    /// A pending carryover is returned as-is without any I/O. Otherwise one
    /// bounded read is performed; a read of zero bytes means the child closed
    /// its output and fails with [`ChannelError::UnexpectedEof`].
    ///
    /// `max_chunk_size` bounds the bytes pulled from the stream, not the
    /// decoded text: each invalid byte becomes a three-byte U+FFFD and up to
    /// three held-back bytes of a split character lead the next chunk.
    pub async fn read_chunk(&mut self) -> Result<String> {
        if let Some(pending) = self.carryover.take() {
            trace!("chunk from carryover: {} bytes", pending.len());
            return Ok(pending);
        }

        loop {
            let n = self.raw_read().await?;
            if n == 0 {
                // A truncated character is still output the caller has not seen
                return self.decoder.finish().ok_or_else(|| ChannelError::UnexpectedEof.into());
            }

            let text = self.decoder.decode(&self.buf[..n]);
            trace!("chunk from stream: {} bytes read", n);
            // Only a partial multi-byte character arrived; read on to complete it
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }

    /// One bounded read from the underlying stream.
    async fn raw_read(&mut self) -> Result<usize> {
        let limit = self.max_chunk_size;
        self.stream
            .read(&mut self.buf[..limit])
            .await
            .map_err(|e| ChannelError::Read(e).into())
    }

    /// Drop any pending output.
    pub fn clear_carryover(&mut self) {
        self.carryover.clear();
    }

    /// Output already read but not yet delivered, if any.
    pub fn carryover(&self) -> Option<&str> {
        self.carryover.as_str()
    }

    /// Get the maximum chunk size.
    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// Mutable access to the wrapped stream, for the line reader.
    pub(crate) fn stream_mut(&mut self) -> &mut R {
        &mut self.stream
    }
}
