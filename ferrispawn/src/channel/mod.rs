//! Channel layer for reading child output and writing child input.
//!
//! This module handles the stream side of a session: bounded chunk reads,
//! line assembly, literal pattern skipping and newline-terminated writes.

mod buffer;
mod decode;
mod lines;
mod patterns;
mod reader;
mod writer;

pub use buffer::Carryover;
pub use patterns::find_literal;
pub use reader::{ChannelConfig, ChunkReader, DEFAULT_MAX_CHUNK_SIZE};
pub use writer::LineWriter;
