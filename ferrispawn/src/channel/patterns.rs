//! Literal pattern skipping for prompt detection.

use log::{debug, trace};
use memchr::memmem;
use tokio::io::AsyncBufRead;

use super::reader::ChunkReader;
use crate::error::{ChannelError, Error, Result};

/// Find the first occurrence of `pattern` in `haystack`.
///
/// Returns the byte offset just past the end of the match.
pub fn find_literal(haystack: &str, pattern: &str) -> Option<usize> {
    memmem::find(haystack.as_bytes(), pattern.as_bytes()).map(|start| start + pattern.len())
}

impl<R: AsyncBufRead + Unpin> ChunkReader<R> {
    /// Discard output up to and including the first occurrence of `pattern`.
    ///
    /// Whatever follows the match in the same chunk becomes the carryover for
    /// the next read. Matching is done per chunk: a pattern whose bytes are
    /// split between two raw reads is not recognised. If the output ends
    /// without a match this fails with [`ChannelError::PatternNotFound`].
    pub async fn skip_to(&mut self, pattern: &str) -> Result<()> {
        if pattern.is_empty() {
            return Ok(());
        }

        loop {
            let chunk = match self.read_chunk().await {
                Ok(chunk) => chunk,
                Err(Error::Channel(ChannelError::UnexpectedEof)) => {
                    debug!("output ended before {:?} appeared", pattern);
                    return Err(ChannelError::PatternNotFound {
                        pattern: pattern.to_string(),
                    }
                    .into());
                }
                Err(e) => return Err(e),
            };

            match find_literal(&chunk, pattern) {
                Some(end) => {
                    trace!("matched {:?}, {} bytes left over", pattern, chunk.len() - end);
                    self.carryover.set(chunk[end..].to_string());
                    return Ok(());
                }
                None => trace!("skipped {} bytes looking for {:?}", chunk.len(), pattern),
            }
        }
    }
}
