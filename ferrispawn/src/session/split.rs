//! Borrowed read and write halves of a session.

use super::base::{InputWriter, OutputReader};
use crate::error::Result;

/// Read half of a [`Session`](super::Session).
pub struct SessionReader<'a> {
    reader: &'a mut OutputReader,
}

impl<'a> SessionReader<'a> {
    pub(crate) fn new(reader: &'a mut OutputReader) -> Self {
        Self { reader }
    }

    /// Return the next chunk of output, carryover first.
    pub async fn read_chunk(&mut self) -> Result<String> {
        self.reader.read_chunk().await
    }

    /// Return the next line of output, or `None` at end of output.
    pub async fn read_next_line(&mut self) -> Result<Option<String>> {
        self.reader.read_next_line().await
    }

    /// Return the next line of output, failing at end of output.
    pub async fn read_line(&mut self) -> Result<String> {
        self.reader.read_line().await
    }

    /// Discard output up to and including `pattern`.
    pub async fn skip_to(&mut self, pattern: &str) -> Result<()> {
        self.reader.skip_to(pattern).await
    }
}

/// Write half of a [`Session`](super::Session).
pub struct SessionWriter<'a> {
    writer: &'a mut InputWriter,
}

impl<'a> SessionWriter<'a> {
    pub(crate) fn new(writer: &'a mut InputWriter) -> Self {
        Self { writer }
    }

    /// Write `line` plus a newline to the child's input.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_line(line).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use crate::Session;

    #[tokio::test]
    async fn test_concurrent_reader_and_writer() {
        let mut session = Session::builder("cat").spawn().unwrap();
        let lines: Vec<String> = (0..2000).map(|i| format!("line {i}")).collect();

        {
            let (mut reader, mut writer) = session.split().unwrap();

            // Enough data to fill both pipes if nobody were reading
            let write = async {
                for line in &lines {
                    writer.write_line(line).await.unwrap();
                }
            };
            let read = async {
                let mut received = Vec::with_capacity(lines.len());
                for _ in 0..lines.len() {
                    received.push(reader.read_line().await.unwrap());
                }
                received
            };

            let ((), received) = tokio::join!(write, read);
            assert_eq!(received, lines);
        }

        session.close().await.unwrap();
    }
}
