//! Error types for ferrispawn.

use std::io;
use thiserror::Error;

/// Main error type for ferrispawn operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Child process errors
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// Stream read/write errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Session state errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Errors from the request/response clients
    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

impl Error {
    /// The child stopped producing output before it was expected to.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, Error::Channel(ChannelError::UnexpectedEof))
    }

    /// A pattern skip ran out of output without a match.
    pub fn is_pattern_not_found(&self) -> bool {
        matches!(self, Error::Channel(ChannelError::PatternNotFound { .. }))
    }

    /// The session was used after it was closed.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Error::Session(SessionError::Closed))
    }

    /// Writing to the child's input failed.
    pub fn is_write_error(&self) -> bool {
        matches!(
            self,
            Error::Channel(
                ChannelError::WriterClosed | ChannelError::BrokenPipe | ChannelError::Write(_)
            )
        )
    }
}

/// Process layer errors (spawning, exit status).
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The child process could not be created
    #[error("Failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child was created but one of its pipes was not available
    #[error("Spawned process has no {0} pipe")]
    MissingStream(&'static str),

    /// Waiting for or polling the exit status failed
    #[error("Failed to wait for process: {0}")]
    Wait(#[source] io::Error),
}

/// Channel layer errors (reading output, writing input).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The input stream has already been closed
    #[error("Input stream closed")]
    WriterClosed,

    /// The child closed its input or exited
    #[error("Broken pipe while writing to process")]
    BrokenPipe,

    /// Any other write failure
    #[error("Write failed: {0}")]
    Write(#[source] io::Error),

    /// A raw read returned no data
    #[error("Process output ended unexpectedly")]
    UnexpectedEof,

    /// Output ended before the pattern appeared
    #[error("Pattern {pattern:?} not found before end of output")]
    PatternNotFound { pattern: String },

    /// The output stream reported an I/O error
    #[error("Read failed: {0}")]
    Read(#[source] io::Error),
}

/// Session lifecycle errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session has been closed
    #[error("Session is closed")]
    Closed,
}

/// Errors raised by the calculator and cipher clients.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Operation name not in the operation table
    #[error("Unknown operation '{name}'")]
    UnknownOperation { name: String },

    /// The child answered with something other than the expected result line
    #[error("Expected a line starting with {expected:?}, got {line:?}")]
    UnexpectedResponse { expected: String, line: String },
}

/// Result type alias using ferrispawn's Error.
pub type Result<T> = std::result::Result<T, Error>;
