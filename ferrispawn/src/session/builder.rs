//! Builder for spawning sessions.

use std::path::PathBuf;

use super::base::Session;
use crate::channel::ChannelConfig;
use crate::error::Result;
use crate::transport::SpawnConfig;

/// Builder for constructing sessions.
///
/// # Example
///
/// ```rust,no_run
/// use ferrispawn::SessionBuilder;
///
/// # async fn example() -> Result<(), ferrispawn::Error> {
/// let session = SessionBuilder::new("./calculator")
///     .working_dir("/opt/calc")
///     .env("LANG", "C")
///     .max_chunk_size(1024)
///     .spawn()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    config: SpawnConfig,
    channel: ChannelConfig,
}

impl SessionBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            config: SpawnConfig::new(program),
            channel: ChannelConfig::default(),
        }
    }

    /// Start from an existing spawn configuration.
    pub fn from_config(config: SpawnConfig) -> Self {
        Self {
            config,
            channel: ChannelConfig::default(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.config.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory of the child.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.working_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for the child.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.env.insert(key.into(), value.into());
        self
    }

    /// Set the maximum size of one raw read (default: 4096 bytes).
    pub fn max_chunk_size(mut self, size: usize) -> Self {
        self.channel.max_chunk_size = size;
        self
    }

    /// Get the spawn configuration built so far.
    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Spawn the child and return the session.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> Result<Session> {
        Session::spawn_with(&self.config, self.channel)
    }
}
