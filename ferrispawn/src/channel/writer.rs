//! Line-oriented writes to the child's input.

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{ChannelError, Result};

/// Writer over a child's input stream.
pub struct LineWriter<W> {
    stream: Option<W>,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    /// Wrap an input stream.
    pub fn new(stream: W) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Write `line` followed by a newline and flush.
    ///
    /// Suspends while the pipe is full, i.e. while the child is not reading.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(ChannelError::WriterClosed)?;

        let mut data = String::with_capacity(line.len() + 1);
        data.push_str(line);
        data.push('\n');

        stream.write_all(data.as_bytes()).await.map_err(write_error)?;
        stream.flush().await.map_err(write_error)?;
        Ok(())
    }

    /// Close the stream, signalling end of input to the child.
    pub fn close(&mut self) {
        self.stream = None;
    }

    /// Check if the stream is still open.
    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }
}

fn write_error(e: io::Error) -> ChannelError {
    if e.kind() == io::ErrorKind::BrokenPipe {
        ChannelError::BrokenPipe
    } else {
        ChannelError::Write(e)
    }
}
