//! Planning validation engine (spec §4.4).
//!
//! Runs a sequence of [`PlanningValidationSpec`]s with AND semantics: the
//! first failing check short-circuits the remainder and the engine returns
//! the partial result list with no error. A *configuration* error (invalid
//! regex, unreadable prompt file) is distinct from a validation *failure*
//! and returns `Err` instead.

use std::path::{Path, PathBuf};
use std::process::Command;

use glob::glob;
use governator_core::validation_spec::Expect;
use governator_core::{PlanningValidationSpec, ValidationSpecResult};
use regex::Regex;
use thiserror::Error;

/// Configuration-level failure: something about the spec itself, not the
/// thing it's checking, is wrong.
#[derive(Debug, Error)]
pub enum ValidationEngineError {
    #[error("invalid regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid glob pattern `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("prompt spec has neither `inline` nor `prompt_path` content")]
    EmptyPromptContent,
    #[error("reading prompt file {path}: {source}")]
    PromptFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One numbered planning step to validate, carrying the step identity used
/// in [`ValidationSpecResult`] audit records.
pub struct PlanningStep<'a> {
    pub step_id: String,
    pub step_name: String,
    pub spec: &'a PlanningValidationSpec,
}

/// Runs `steps` against `repo_root`, stopping at the first failure.
///
/// Returns `Ok(results)` for both "all passed" and "failed partway" — a
/// failed check is not an error, it's a result with `valid: false`. Returns
/// `Err` only for configuration problems that prevented a check from even
/// running.
pub fn run(repo_root: &Path, steps: &[PlanningStep<'_>]) -> Result<Vec<ValidationSpecResult>, ValidationEngineError> {
    let mut results = Vec::with_capacity(steps.len());
    for step in steps {
        let result = run_one(repo_root, step)?;
        let failed = !result.valid;
        results.push(result);
        if failed {
            break;
        }
    }
    Ok(results)
}

fn run_one(repo_root: &Path, step: &PlanningStep<'_>) -> Result<ValidationSpecResult, ValidationEngineError> {
    let spec_type = step.spec.type_name();
    let (valid, message) = match step.spec {
        PlanningValidationSpec::Command { command, expect, stdout_contains, stdout_regex } => {
            run_command(repo_root, command, *expect, stdout_contains.as_deref(), stdout_regex.as_deref())?
        }
        PlanningValidationSpec::File { path, file_regex } => check_file(repo_root, path, file_regex.as_deref())?,
        PlanningValidationSpec::Directory { path } => check_directory(repo_root, path)?,
        PlanningValidationSpec::Prompt { inline, prompt_path, expect, stdout_contains, stdout_regex } => {
            run_prompt(repo_root, inline.as_deref(), prompt_path.as_deref(), *expect, stdout_contains.as_deref(), stdout_regex.as_deref())?
        }
    };
    Ok(ValidationSpecResult {
        spec_type,
        valid,
        message,
        step_id: step.step_id.clone(),
        step_name: step.step_name.clone(),
    })
}

fn has_glob_metachars(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

fn check_stdout_predicates(
    stdout: &str,
    contains: Option<&str>,
    pattern: Option<&str>,
) -> Result<Option<String>, ValidationEngineError> {
    let trimmed = stdout.trim();
    if let Some(needle) = contains {
        if !trimmed.contains(needle) {
            return Ok(Some(format!("stdout does not contain {needle:?}")));
        }
    }
    if let Some(pattern) = pattern {
        let re = Regex::new(pattern).map_err(|source| ValidationEngineError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;
        if !re.is_match(trimmed) {
            return Ok(Some(format!("stdout does not match regex {pattern:?}")));
        }
    }
    Ok(None)
}

fn run_command(
    repo_root: &Path,
    command: &str,
    expect: Expect,
    stdout_contains: Option<&str>,
    stdout_regex: Option<&str>,
) -> Result<(bool, String), ValidationEngineError> {
    let output = Command::new("bash").arg("-lc").arg(command).current_dir(repo_root).output();
    let output = match output {
        Ok(output) => output,
        Err(err) => return Ok((false, format!("failed to spawn command: {err}"))),
    };
    let success = output.status.success();
    let expectation_met = match expect {
        Expect::Success => success,
        Expect::Failure => !success,
    };
    if !expectation_met {
        return Ok((false, format!("command exited with status {:?}, expected {:?}", output.status.code(), expect)));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if let Some(failure) = check_stdout_predicates(&stdout, stdout_contains, stdout_regex)? {
        return Ok((false, failure));
    }
    Ok((true, "command check passed".to_string()))
}

fn expand_glob(repo_root: &Path, pattern: &str) -> Result<Vec<PathBuf>, ValidationEngineError> {
    let full_pattern = repo_root.join(pattern);
    let pattern_str = full_pattern.to_string_lossy().into_owned();
    let paths = glob(&pattern_str)
        .map_err(|source| ValidationEngineError::InvalidGlob { pattern: pattern.to_string(), source })?
        .filter_map(Result::ok)
        .collect();
    Ok(paths)
}

fn check_file(repo_root: &Path, path: &str, file_regex: Option<&str>) -> Result<(bool, String), ValidationEngineError> {
    let compiled_regex = file_regex
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ValidationEngineError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })
        })
        .transpose()?;

    if has_glob_metachars(path) {
        let matches = expand_glob(repo_root, path)?;
        if matches.is_empty() {
            return Ok((false, format!("no files match glob {path:?}")));
        }
        for candidate in &matches {
            if let Some(reason) = file_check_reason(candidate, compiled_regex.as_ref()) {
                return Ok((false, format!("{}: {reason}", candidate.display())));
            }
        }
        return Ok((true, format!("{} file(s) matched {path:?}", matches.len())));
    }

    let full_path = repo_root.join(path);
    if let Some(reason) = file_check_reason(&full_path, compiled_regex.as_ref()) {
        return Ok((false, reason));
    }
    Ok((true, "file check passed".to_string()))
}

fn file_check_reason(path: &Path, file_regex: Option<&Regex>) -> Option<String> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return Some("does not exist".to_string()),
    };
    let metadata = if metadata.file_type().is_symlink() {
        match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => return Some("does not exist".to_string()),
        }
    } else {
        metadata
    };
    if !metadata.is_file() {
        return Some("not a regular file".to_string());
    }
    if metadata.len() == 0 {
        return Some("file is empty".to_string());
    }
    if let Some(re) = file_regex {
        match std::fs::read_to_string(path) {
            Ok(contents) if re.is_match(&contents) => {}
            Ok(_) => return Some("file content does not match regex".to_string()),
            Err(_) => return Some("file is not readable".to_string()),
        }
    }
    None
}

fn check_directory(repo_root: &Path, path: &str) -> Result<(bool, String), ValidationEngineError> {
    if has_glob_metachars(path) {
        let matches = expand_glob(repo_root, path)?;
        if matches.is_empty() {
            return Ok((false, format!("no directories match glob {path:?}")));
        }
        for candidate in &matches {
            if !candidate.is_dir() {
                return Ok((false, format!("{} is not a directory", candidate.display())));
            }
        }
        return Ok((true, format!("{} directory(ies) matched {path:?}", matches.len())));
    }
    let full_path = repo_root.join(path);
    if !full_path.is_dir() {
        return Ok((false, "does not exist or is not a directory".to_string()));
    }
    Ok((true, "directory check passed".to_string()))
}

fn run_prompt(
    repo_root: &Path,
    inline: Option<&str>,
    prompt_path: Option<&str>,
    expect: Expect,
    stdout_contains: Option<&str>,
    stdout_regex: Option<&str>,
) -> Result<(bool, String), ValidationEngineError> {
    let content = match (inline, prompt_path) {
        (Some(inline), _) if !inline.trim().is_empty() => inline.to_string(),
        (_, Some(path)) => {
            let full_path = repo_root.join(path);
            std::fs::read_to_string(&full_path)
                .map_err(|source| ValidationEngineError::PromptFileUnreadable { path: full_path, source })?
        }
        _ => return Err(ValidationEngineError::EmptyPromptContent),
    };
    if content.trim().is_empty() {
        return Err(ValidationEngineError::EmptyPromptContent);
    }
    run_command(repo_root, &content, expect, stdout_contains, stdout_regex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(spec: PlanningValidationSpec) -> PlanningValidationSpec {
        spec
    }

    fn steps(specs: Vec<PlanningValidationSpec>) -> Vec<PlanningStep<'static>> {
        // leaked for test convenience; specs outlive the test body
        specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| PlanningStep {
                step_id: format!("step-{i}"),
                step_name: format!("step {i}"),
                spec: Box::leak(Box::new(spec)),
            })
            .collect()
    }

    #[test]
    fn and_short_circuit_stops_after_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "ok").unwrap();
        let specs = steps(vec![
            step(PlanningValidationSpec::File { path: "a.txt".into(), file_regex: None }),
            step(PlanningValidationSpec::Command { command: "exit 1".into(), expect: Expect::Success, stdout_contains: None, stdout_regex: None }),
            step(PlanningValidationSpec::File { path: "a.txt".into(), file_regex: None }),
        ]);
        let results = run(dir.path(), &specs).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].valid);
        assert!(!results[1].valid);
    }

    #[test]
    fn glob_with_no_matches_fails_with_expected_message() {
        let dir = tempfile::tempdir().unwrap();
        let specs = steps(vec![step(PlanningValidationSpec::File { path: "docs/missing*.md".into(), file_regex: None })]);
        let results = run(dir.path(), &specs).unwrap();
        assert!(!results[0].valid);
        assert!(results[0].message.contains("no files match glob"));
    }

    #[test]
    fn file_check_passes_for_nonempty_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), "hello").unwrap();
        let specs = steps(vec![step(PlanningValidationSpec::File { path: "readme.md".into(), file_regex: None })]);
        let results = run(dir.path(), &specs).unwrap();
        assert!(results[0].valid);
    }

    #[test]
    fn directory_glob_fails_when_a_match_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pkg_a")).unwrap();
        std::fs::write(dir.path().join("pkg_b"), "not a dir").unwrap();
        let specs = steps(vec![step(PlanningValidationSpec::Directory { path: "pkg_*".into() })]);
        let results = run(dir.path(), &specs).unwrap();
        assert!(!results[0].valid);
    }
}
