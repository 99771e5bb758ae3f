//! The interactive session: a child process plus its two streams.

use log::{debug, trace, warn};
use tokio::io::BufReader;
use tokio::process::{ChildStdin, ChildStdout};

use super::builder::SessionBuilder;
use super::split::{SessionReader, SessionWriter};
use crate::channel::{ChannelConfig, ChunkReader, LineWriter};
use crate::error::{Result, SessionError};
use crate::transport::{ProcessHandle, SpawnConfig};

pub(crate) type OutputReader = ChunkReader<BufReader<ChildStdout>>;
pub(crate) type InputWriter = LineWriter<ChildStdin>;

/// An interactive session with a spawned child process.
///
/// The session owns the child and both of its pipes. Output is read with
/// [`read_chunk`](Self::read_chunk), [`read_line`](Self::read_line) and
/// [`skip_to`](Self::skip_to), which share one carryover slot; input is sent
/// with [`write_line`](Self::write_line).
///
/// Call [`close`](Self::close) (or [`close_blocking`](Self::close_blocking))
/// when done. Closing is idempotent; every other operation on a closed
/// session fails with [`SessionError::Closed`].
///
/// # Example
///
/// ```rust,no_run
/// use ferrispawn::Session;
///
/// # async fn example() -> Result<(), ferrispawn::Error> {
/// let mut session = Session::builder("python3").arg("-i").spawn()?;
///
/// session.skip_to(">>> ").await?;
/// session.write_line("print(6 * 7)").await?;
/// let answer = session.read_line().await?;
/// assert_eq!(answer, "42");
///
/// session.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct Session {
    process: ProcessHandle,
    reader: Option<OutputReader>,
    writer: InputWriter,
    closed: bool,
}

impl Session {
    /// Start building a session for `program`.
    pub fn builder(program: impl Into<String>) -> SessionBuilder {
        SessionBuilder::new(program)
    }

    /// Spawn the child described by `config` with default channel settings.
    pub fn spawn(config: &SpawnConfig) -> Result<Self> {
        Self::spawn_with(config, ChannelConfig::default())
    }

    /// Spawn the child described by `config`.
    ///
    /// Must be called from within a tokio runtime. Either a fully working
    /// session is returned or nothing is.
    pub fn spawn_with(config: &SpawnConfig, channel: ChannelConfig) -> Result<Self> {
        let (process, stdin, stdout) = ProcessHandle::spawn(config)?;
        Ok(Self {
            process,
            reader: Some(ChunkReader::new(BufReader::new(stdout), channel)),
            writer: LineWriter::new(stdin),
            closed: false,
        })
    }

    /// Write `line` plus a newline to the child's input.
    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        trace!("write: {:?}", line);
        self.writer()?.write_line(line).await
    }

    /// Write a line without logging its content.
    pub(crate) async fn write_hidden(&mut self, line: &str) -> Result<()> {
        trace!("write: <hidden, {} bytes>", line.len());
        self.writer()?.write_line(line).await
    }

    /// Return the next chunk of output, carryover first.
    pub async fn read_chunk(&mut self) -> Result<String> {
        self.reader()?.read_chunk().await
    }

    /// Return the next line of output, or `None` at end of output.
    pub async fn read_next_line(&mut self) -> Result<Option<String>> {
        self.reader()?.read_next_line().await
    }

    /// Return the next line of output, failing at end of output.
    pub async fn read_line(&mut self) -> Result<String> {
        self.reader()?.read_line().await
    }

    /// Discard output up to and including `pattern`.
    pub async fn skip_to(&mut self, pattern: &str) -> Result<()> {
        self.reader()?.skip_to(pattern).await
    }

    /// Split into independently usable read and write halves.
    ///
    /// Lets one task drive the child's input while another consumes its
    /// output, e.g. under `tokio::join!`.
    pub fn split(&mut self) -> Result<(SessionReader<'_>, SessionWriter<'_>)> {
        self.ensure_open()?;
        let reader = self.reader.as_mut().ok_or(SessionError::Closed)?;
        Ok((SessionReader::new(reader), SessionWriter::new(&mut self.writer)))
    }

    /// Check without blocking whether the child has terminated.
    pub fn has_exited(&mut self) -> Result<bool> {
        self.ensure_open()?;
        self.process.has_exited()
    }

    /// OS process id of the child, if it has not been reaped yet.
    pub fn id(&self) -> Option<u32> {
        self.process.id()
    }

    /// Check if the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close both streams and wait for the child to exit.
    ///
    /// Only the first call (of this or [`close_blocking`](Self::close_blocking))
    /// does any work; later calls return `Ok(())` immediately.
    pub async fn close(&mut self) -> Result<()> {
        if !self.release_streams() {
            return Ok(());
        }
        self.process.wait().await?;
        Ok(())
    }

    /// Blocking counterpart of [`close`](Self::close).
    ///
    /// Blocks the calling thread until the child exits.
    pub fn close_blocking(&mut self) -> Result<()> {
        if !self.release_streams() {
            return Ok(());
        }
        self.process.wait_blocking()?;
        Ok(())
    }

    /// Mark the session closed and drop both pipes, output first.
    ///
    /// The pipes must be gone before waiting: a child blocked writing into a
    /// full output pipe, or reading an input pipe nobody closes, would
    /// otherwise never exit. Returns `false` if the session was already
    /// closed.
    fn release_streams(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;

        if let Some(mut reader) = self.reader.take() {
            reader.clear_carryover();
        }
        self.writer.close();

        debug!(
            "closed streams of '{}' (pid {:?})",
            self.process.program(),
            self.process.id()
        );
        true
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(SessionError::Closed.into());
        }
        Ok(())
    }

    fn reader(&mut self) -> Result<&mut OutputReader> {
        self.ensure_open()?;
        Ok(self.reader.as_mut().ok_or(SessionError::Closed)?)
    }

    fn writer(&mut self) -> Result<&mut InputWriter> {
        self.ensure_open()?;
        Ok(&mut self.writer)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.closed {
            warn!(
                "session for '{}' dropped without close(); releasing pipes",
                self.process.program()
            );
            self.release_streams();
        }
    }
}
