//! # Ferrispawn
//!
//! Async library for automating interactive child processes.
//!
//! Ferrispawn spawns a program with piped stdin/stdout and lets you hold a
//! back-and-forth conversation with it, similar to the classic `expect`
//! tool: wait for a prompt, answer it, read the result.
//!
//! ## Features
//!
//! - Async process I/O via tokio
//! - Three read primitives (chunks, lines, literal pattern skips) sharing
//!   one carryover buffer, so no output is lost or duplicated between them
//! - Prompt/reply sequences with hidden (unlogged) replies
//! - Idempotent, deadlock-safe shutdown in async and blocking flavours
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ferrispawn::Session;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ferrispawn::Error> {
//!     let mut session = Session::builder("./calculator").spawn()?;
//!
//!     session.skip_to("Please enter the first number: ").await?;
//!     session.write_line("7").await?;
//!     session.skip_to("Please enter the second number: ").await?;
//!     session.write_line("5").await?;
//!     session.skip_to("Please enter the operation: ").await?;
//!     session.write_line("+").await?;
//!
//!     let result = session.read_line().await?;
//!     println!("{}", result);
//!
//!     session.close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod client;
pub mod error;
pub mod session;
pub mod transport;

// Re-export main types for convenience
pub use client::{Calculator, Cipher, Operation, OperationTable};
pub use error::{Error, Result};
pub use session::{
    InteractiveBuilder, InteractiveEvent, Session, SessionBuilder, SessionReader, SessionWriter,
};
pub use transport::SpawnConfig;
