//! Session layer: the child process and its streams under one owner.
//!
//! A [`Session`] spawns the child, routes reads and writes through the
//! channel layer and performs the deadlock-safe shutdown.

mod base;
mod builder;
mod interactive;
mod split;

pub use base::Session;
pub use builder::SessionBuilder;
pub use interactive::{InteractiveBuilder, InteractiveBuilderWithPrompt, InteractiveEvent};
pub use split::{SessionReader, SessionWriter};
