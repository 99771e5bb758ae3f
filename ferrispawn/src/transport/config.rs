//! Child process spawn configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Everything needed to start the child process.
///
/// The program is executed directly; no shell is involved, so arguments are
/// passed through verbatim. Standard input and output are always piped,
/// standard error is inherited from the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Path or name of the executable.
    pub program: String,

    /// Arguments passed to the program.
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory (inherited when `None`).
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Extra environment variables layered over the parent's environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl SpawnConfig {
    /// Create a configuration for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }

    /// Program and arguments joined for log output.
    pub fn display_command(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let config: SpawnConfig = serde_json::from_str(r#"{"program": "cat"}"#).unwrap();
        assert_eq!(config, SpawnConfig::new("cat"));
    }

    #[test]
    fn test_deserialize_full() {
        let config: SpawnConfig = serde_json::from_str(
            r#"{
                "program": "python3",
                "args": ["-u", "calc.py"],
                "working_dir": "/tmp",
                "env": {"PYTHONIOENCODING": "utf-8"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.args, vec!["-u", "calc.py"]);
        assert_eq!(config.working_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(config.env.get("PYTHONIOENCODING").map(String::as_str), Some("utf-8"));
        assert_eq!(config.display_command(), "python3 -u calc.py");
    }
}
