//! Prompt/reply sequences for driving interactive programs.
//!
//! Many interactive programs ask for their input one field at a time:
//! - a calculator asks "Please enter the first number: "
//! - a login asks "Password: "
//!
//! `send_interactive` handles these by waiting for each prompt and then
//! writing the matching reply.

use log::debug;

use super::base::Session;
use crate::error::{ClientError, Result};

/// One prompt/reply step in an interactive sequence.
///
/// # Example
///
/// ```rust
/// use ferrispawn::InteractiveEvent;
///
/// let events = vec![
///     InteractiveEvent::new("Please enter the first number: ", "7"),
///     InteractiveEvent::hidden("Password: ", "hunter2"),
/// ];
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractiveEvent {
    /// Literal prompt text to wait for.
    pub prompt: String,

    /// Line to send once the prompt has been seen.
    pub reply: String,

    /// Whether the reply should be kept out of logs (e.g., passwords).
    pub hidden: bool,
}

impl InteractiveEvent {
    /// Create a new interactive event.
    pub fn new(prompt: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reply: reply.into(),
            hidden: false,
        }
    }

    /// Create an event whose reply is not logged.
    pub fn hidden(prompt: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            hidden: true,
            ..Self::new(prompt, reply)
        }
    }

    /// Mark this event's reply as hidden (for logging).
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Builder for creating interactive sequences.
///
/// # Example
///
/// ```rust
/// use ferrispawn::InteractiveBuilder;
///
/// let events = InteractiveBuilder::new()
///     .expect("Please enter the first number: ")
///     .send("7")
///     .expect("Please enter the second number: ")
///     .send("5")
///     .build();
/// assert_eq!(events.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct InteractiveBuilder {
    events: Vec<InteractiveEvent>,
}

impl InteractiveBuilder {
    /// Create a new interactive builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prompt to wait for.
    ///
    /// Must be followed by `send()` to specify the reply.
    pub fn expect(self, prompt: impl Into<String>) -> InteractiveBuilderWithPrompt {
        InteractiveBuilderWithPrompt {
            builder: self,
            prompt: prompt.into(),
        }
    }

    /// Build the list of interactive events.
    pub fn build(self) -> Vec<InteractiveEvent> {
        self.events
    }
}

/// Intermediate state for the builder after `expect()` is called.
#[derive(Debug)]
pub struct InteractiveBuilderWithPrompt {
    builder: InteractiveBuilder,
    prompt: String,
}

impl InteractiveBuilderWithPrompt {
    /// Reply to send once the prompt appears.
    pub fn send(self, reply: impl Into<String>) -> InteractiveBuilder {
        let Self {
            mut builder,
            prompt,
        } = self;
        builder.events.push(InteractiveEvent::new(prompt, reply));
        builder
    }

    /// Reply to send once the prompt appears, kept out of logs.
    pub fn send_hidden(self, reply: impl Into<String>) -> InteractiveBuilder {
        let Self {
            mut builder,
            prompt,
        } = self;
        builder.events.push(InteractiveEvent::hidden(prompt, reply));
        builder
    }
}

impl Session {
    /// Work through a prompt/reply sequence.
    ///
    /// For each event, output is skipped up to and including the prompt and
    /// the reply is written. Stops at the first failure.
    pub async fn send_interactive(&mut self, events: &[InteractiveEvent]) -> Result<()> {
        for event in events {
            self.skip_to(&event.prompt).await?;
            if event.hidden {
                debug!("prompt {:?} -> <hidden>", event.prompt);
                self.write_hidden(&event.reply).await?;
            } else {
                debug!("prompt {:?} -> {:?}", event.prompt, event.reply);
                self.write_line(&event.reply).await?;
            }
        }
        Ok(())
    }

    /// Read the next line and return what follows `label`.
    ///
    /// Used for result lines such as `Result: 42`. A line that does not
    /// start with `label` fails with [`ClientError::UnexpectedResponse`].
    pub async fn read_labeled(&mut self, label: &str) -> Result<String> {
        let line = self.read_line().await?;
        match line.strip_prefix(label) {
            Some(value) => Ok(value.to_string()),
            None => Err(ClientError::UnexpectedResponse {
                expected: label.to_string(),
                line,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_event_new() {
        let event = InteractiveEvent::new("Number: ", "7");
        assert_eq!(event.prompt, "Number: ");
        assert_eq!(event.reply, "7");
        assert!(!event.hidden);
    }

    #[test]
    fn test_interactive_event_hidden() {
        let event = InteractiveEvent::hidden("Password: ", "secret123");
        assert_eq!(event.reply, "secret123");
        assert!(event.hidden);
        assert!(!event.with_hidden(false).hidden);
    }

    #[test]
    fn test_interactive_builder_with_hidden() {
        let events = InteractiveBuilder::new()
            .expect("Username: ")
            .send("admin")
            .expect("Password: ")
            .send_hidden("secret")
            .build();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], InteractiveEvent::new("Username: ", "admin"));
        assert!(events[1].hidden);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_send_interactive_and_read_labeled() {
        let mut session = Session::builder("sh")
            .arg("-c")
            .arg(r#"printf 'Name: '; read n; printf 'PIN: '; read p; echo "Welcome: $n/$p""#)
            .spawn()
            .unwrap();

        let events = InteractiveBuilder::new()
            .expect("Name: ")
            .send("ferris")
            .expect("PIN: ")
            .send_hidden("1234")
            .build();

        session.send_interactive(&events).await.unwrap();
        assert_eq!(session.read_labeled("Welcome: ").await.unwrap(), "ferris/1234");
        session.close().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_read_labeled_mismatch() {
        let mut session = Session::builder("sh")
            .arg("-c")
            .arg("echo 'Error: division by zero'")
            .spawn()
            .unwrap();

        let err = session.read_labeled("Result: ").await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Client(ClientError::UnexpectedResponse { ref line, .. })
                if line == "Error: division by zero"
        ));
        session.close().await.unwrap();
    }
}
