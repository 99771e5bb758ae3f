//! Line assembly across the carryover/stream boundary.

use log::trace;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::reader::ChunkReader;
use crate::error::{ChannelError, Result};

impl<R: AsyncBufRead + Unpin> ChunkReader<R> {
    /// Read the next newline-delimited line, terminator stripped.
    ///
    /// Returns `Ok(None)` once the output is exhausted. A pending carryover
    /// is consumed first; if it holds only the start of a line, the rest is
    /// read from the stream and joined to it. At end of output a final line
    /// without a terminator is returned as-is.
    pub async fn read_next_line(&mut self) -> Result<Option<String>> {
        let Some(mut pending) = self.carryover.take() else {
            return self.read_stream_line(String::new()).await;
        };

        if let Some(pos) = memchr::memchr(b'\n', pending.as_bytes()) {
            let rest = pending.split_off(pos + 1);
            self.carryover.set(rest);
            trim_terminator(&mut pending);
            trace!("line from carryover: {:?}", pending);
            return Ok(Some(pending));
        }

        self.read_stream_line(pending).await
    }

    /// Read the next line, failing if the output is exhausted.
    pub async fn read_line(&mut self) -> Result<String> {
        self.read_next_line()
            .await?
            .ok_or_else(|| ChannelError::UnexpectedEof.into())
    }

    /// Read one line from the stream and append it to `prefix`.
    ///
    /// With an empty prefix and nothing left on the stream this yields
    /// `None`; with a non-empty prefix the prefix alone is the last line.
    async fn read_stream_line(&mut self, prefix: String) -> Result<Option<String>> {
        let mut line = prefix.into_bytes();
        line.extend(self.decoder.take_pending());

        let n = self
            .stream_mut()
            .read_until(b'\n', &mut line)
            .await
            .map_err(ChannelError::Read)?;

        if line.is_empty() {
            return Ok(None);
        }
        if n > 0 && line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        let line = String::from_utf8_lossy(&line).into_owned();
        trace!("line from stream: {:?}", line);
        Ok(Some(line))
    }
}

/// Strip the trailing `\n` (and a `\r` before it) from a carryover line.
fn trim_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::BufReader;
    use tokio_test::io::Builder;

    use super::*;

    #[tokio::test]
    async fn test_lines_from_stream() {
        let mock = Builder::new().read(b"one\ntwo\r\nthree").build();
        let mut reader = ChunkReader::with_defaults(BufReader::new(mock));

        assert_eq!(reader.read_next_line().await.unwrap().as_deref(), Some("one"));
        assert_eq!(reader.read_next_line().await.unwrap().as_deref(), Some("two"));
        assert_eq!(reader.read_next_line().await.unwrap().as_deref(), Some("three"));
        assert_eq!(reader.read_next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_complete_line_in_carryover_needs_no_io() {
        let mock = Builder::new().build();
        let mut reader = ChunkReader::with_defaults(BufReader::new(mock));
        reader.carryover.set("Result: 12\nPlease enter".to_string());

        assert_eq!(reader.read_line().await.unwrap(), "Result: 12");
        assert_eq!(reader.carryover(), Some("Please enter"));
    }

    #[tokio::test]
    async fn test_terminator_at_end_clears_carryover() {
        let mock = Builder::new().build();
        let mut reader = ChunkReader::with_defaults(BufReader::new(mock));
        reader.carryover.set("last\n".to_string());

        assert_eq!(reader.read_line().await.unwrap(), "last");
        assert!(reader.carryover().is_none());
    }

    #[tokio::test]
    async fn test_partial_carryover_joined_with_stream() {
        let mock = Builder::new().read(b"12\nnext\n").build();
        let mut reader = ChunkReader::with_defaults(BufReader::new(mock));
        reader.carryover.set("Result: ".to_string());

        assert_eq!(reader.read_line().await.unwrap(), "Result: 12");
        assert!(reader.carryover().is_none());
        assert_eq!(reader.read_line().await.unwrap(), "next");
    }

    #[tokio::test]
    async fn test_partial_carryover_is_last_line_at_eof() {
        let mock = Builder::new().build();
        let mut reader = ChunkReader::with_defaults(BufReader::new(mock));
        reader.carryover.set("no newline".to_string());

        assert_eq!(reader.read_next_line().await.unwrap().as_deref(), Some("no newline"));
        assert_eq!(reader.read_next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_crlf_split_across_boundary() {
        let mock = Builder::new().read(b"\n").build();
        let mut reader = ChunkReader::with_defaults(BufReader::new(mock));
        reader.carryover.set("value\r".to_string());

        assert_eq!(reader.read_line().await.unwrap(), "value");
    }

    #[tokio::test]
    async fn test_strict_read_line_at_eof() {
        let mock = Builder::new().build();
        let mut reader = ChunkReader::with_defaults(BufReader::new(mock));

        let err = reader.read_line().await.unwrap_err();
        assert!(err.is_unexpected_eof());
    }

    #[tokio::test]
    async fn test_chunk_then_line_keeps_order() {
        let mock = Builder::new().read(b"abc").read(b"def\nghi\n").build();
        let mut reader = ChunkReader::with_defaults(BufReader::new(mock));

        assert_eq!(reader.read_chunk().await.unwrap(), "abc");
        assert_eq!(reader.read_line().await.unwrap(), "def");
        assert_eq!(reader.read_line().await.unwrap(), "ghi");
    }
}
