//! Client for a prompt-driven shift cipher program.

use log::warn;

use crate::error::Result;
use crate::session::{InteractiveBuilder, Session};

/// Prompt and result texts of the cipher protocol.
#[derive(Debug, Clone)]
pub struct CipherPrompts {
    pub text: String,
    pub shift: String,
    pub result_label: String,
}

impl Default for CipherPrompts {
    fn default() -> Self {
        Self {
            text: "Please enter the text: ".to_string(),
            shift: "Please enter the shift: ".to_string(),
            result_label: "Result: ".to_string(),
        }
    }
}

/// Drives a shift-cipher child.
///
/// Like [`Calculator`](super::Calculator), any failure closes the session.
pub struct Cipher<'a> {
    session: &'a mut Session,
    prompts: CipherPrompts,
}

impl<'a> Cipher<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self::with_prompts(session, CipherPrompts::default())
    }

    pub fn with_prompts(session: &'a mut Session, prompts: CipherPrompts) -> Self {
        Self { session, prompts }
    }

    /// Shift every letter of `text` forward by `shift`.
    pub async fn encrypt(&mut self, text: &str, shift: i32) -> Result<String> {
        self.run(text, shift).await
    }

    /// Undo [`encrypt`](Self::encrypt) by shifting backwards.
    pub async fn decrypt(&mut self, text: &str, shift: i32) -> Result<String> {
        self.run(text, -shift).await
    }

    async fn run(&mut self, text: &str, shift: i32) -> Result<String> {
        let events = InteractiveBuilder::new()
            .expect(self.prompts.text.as_str())
            .send(text)
            .expect(self.prompts.shift.as_str())
            .send(shift.to_string())
            .build();

        let outcome = match self.session.send_interactive(&events).await {
            Ok(()) => self.session.read_labeled(&self.prompts.result_label).await,
            Err(e) => Err(e),
        };

        if outcome.is_err() {
            if let Err(close_err) = self.session.close().await {
                warn!("failed to close cipher session: {}", close_err);
            }
        }
        outcome
    }
}
