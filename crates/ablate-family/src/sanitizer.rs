//! Algorithm sanitizer.
//!
//! Algorithm bodies are embedded verbatim in the solver section, so any
//! body or result name containing a denylisted identifier aborts the
//! compilation. Matching is by substring: `evaluate` is rejected because
//! it contains `eval`. This over-rejects on purpose; there is no parser.

use crate::error::CompileError;

/// Identifiers that are always denied: file I/O, dynamic evaluation,
/// formatted I/O, deletion, and load/save/format operations.
pub const DENIED_IDENTIFIERS: &[&str] = &[
    "funcdel", "sprintf", "sscanf", "eval", "source", "fread", "fscanf", "fgets", "fwrite",
    "fprintf", "fputs", "fopen", "freopen", "fclose", "save", "load", "format",
];

/// Substring denylist checker.
#[derive(Clone, Debug)]
pub struct Sanitizer {
    denied: Vec<String>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl Sanitizer {
    /// The fixed denylist plus `extra` identifiers.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut denied: Vec<String> = DENIED_IDENTIFIERS.iter().map(|s| (*s).to_owned()).collect();
        for id in extra {
            let id = id.into();
            if !denied.contains(&id) {
                denied.push(id);
            }
        }
        Self { denied }
    }

    /// Every denied identifier, fixed entries first.
    pub fn denied(&self) -> &[String] {
        &self.denied
    }

    /// Reject `content` or `result` if either contains a denied identifier.
    pub fn check(&self, result: &str, content: &str) -> Result<(), CompileError> {
        match self
            .denied
            .iter()
            .find(|id| content.contains(id.as_str()) || result.contains(id.as_str()))
        {
            Some(id) => Err(CompileError::ForbiddenOperation {
                algorithm: result.to_owned(),
                identifier: id.clone(),
            }),
            None => Ok(()),
        }
    }
}
