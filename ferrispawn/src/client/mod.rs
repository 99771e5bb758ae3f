//! Thin request/response clients built on a [`Session`](crate::Session).
//!
//! Each client walks its program through a fixed sequence of prompts,
//! replies to each one, and parses the labeled result line that follows.

mod calculator;
mod cipher;
mod operation;

pub use calculator::{Calculator, CalculatorPrompts};
pub use cipher::{Cipher, CipherPrompts};
pub use operation::{Operation, OperationTable};
