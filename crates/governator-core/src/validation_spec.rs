//! `PlanningValidationSpec` (spec §3, §4.4).
//!
//! Modeled as a discriminated union keyed on `type` rather than a flat
//! struct with optional fields: the field-exclusion rules ("directory
//! rejects `file_regex`", "command rejects `path`", ...) are then enforced
//! by the type system at construction/deserialization time, not by a
//! runtime check a caller could forget to call (spec §9, first design
//! note).

use serde::{Deserialize, Serialize};

/// Expected exit-code class for a `command` or `prompt` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    #[default]
    Success,
    Failure,
}

/// A single declarative check gating a planning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanningValidationSpec {
    /// Runs `bash -lc <command>` with cwd = repo root.
    Command {
        command: String,
        #[serde(default)]
        expect: Expect,
        stdout_contains: Option<String>,
        stdout_regex: Option<String>,
    },
    /// Checks a file (or glob of files) exists, is non-empty, and optionally
    /// matches a content regex.
    File {
        path: String,
        file_regex: Option<String>,
    },
    /// Checks a directory (or glob of directories) exists and is readable.
    Directory { path: String },
    /// Invokes the agent CLI with inline or file-sourced prompt content.
    Prompt {
        inline: Option<String>,
        prompt_path: Option<String>,
        #[serde(default)]
        expect: Expect,
        stdout_contains: Option<String>,
        stdout_regex: Option<String>,
    },
}

impl PlanningValidationSpec {
    /// The type tag, for audit logging and error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Command { .. } => "command",
            Self::File { .. } => "file",
            Self::Directory { .. } => "directory",
            Self::Prompt { .. } => "prompt",
        }
    }
}

/// Outcome of running one [`PlanningValidationSpec`] (spec §4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSpecResult {
    pub spec_type: &'static str,
    pub valid: bool,
    pub message: String,
    pub step_id: String,
    pub step_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_variant_cannot_carry_a_path_field() {
        let spec = PlanningValidationSpec::Command {
            command: "echo ok".into(),
            expect: Expect::Success,
            stdout_contains: None,
            stdout_regex: None,
        };
        assert_eq!(spec.type_name(), "command");
    }

    #[test]
    fn directory_variant_cannot_carry_file_regex() {
        let spec = PlanningValidationSpec::Directory {
            path: "docs/*".into(),
        };
        assert_eq!(spec.type_name(), "directory");
    }

    #[test]
    fn deserializes_tagged_json_by_type_field() {
        let json = r#"{"type":"file","path":"README.md","file_regex":null}"#;
        let spec: PlanningValidationSpec = serde_json::from_str(json).unwrap();
        assert!(matches!(spec, PlanningValidationSpec::File { .. }));
    }
}
