//! The files-required table.
//!
//! Loading a description registers every external mesh file it references
//! under a local name. The file-transport collaborator must make each
//! source available at its local path before the mesher runs.

use std::path::Path;

use indexmap::IndexMap;

/// Insertion-ordered mapping from local path to source location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilesRequired {
    entries: IndexMap<String, String>,
}

impl FilesRequired {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source` to be made available at `local`.
    ///
    /// Returns the previously registered source, if any.
    pub fn register(
        &mut self,
        local: impl Into<String>,
        source: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(local.into(), source.into())
    }

    /// Source registered for `local`.
    pub fn get(&self, local: &str) -> Option<&str> {
        self.entries.get(local).map(String::as_str)
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no files are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(local, source)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, s)| (l.as_str(), s.as_str()))
    }
}

/// Local file name for `source`, renamed to `stem` with the original extension.
///
/// `derived_file_name("needle-1", "/data/probe.vtp")` is `needle-1.vtp`.
/// A source without an extension yields the bare stem.
pub fn derived_file_name(stem: &str, source: &str) -> String {
    match Path::new(source).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_name_keeps_last_extension() {
        assert_eq!(derived_file_name("liver", "/in/organ.vtp"), "liver.vtp");
        assert_eq!(derived_file_name("n1", "a/b.tar.gz"), "n1.gz");
        assert_eq!(derived_file_name("n1", "noext"), "n1");
        assert_eq!(derived_file_name("n1", "dir/.hidden"), "n1");
    }

    #[test]
    fn register_keeps_order_and_reports_replacement() {
        let mut files = FilesRequired::new();
        assert_eq!(files.register("input/b.vtp", "/b"), None);
        assert_eq!(files.register("input/a.vtp", "/a"), None);
        assert_eq!(files.register("input/b.vtp", "/b2"), Some("/b".into()));
        let locals: Vec<_> = files.iter().map(|(l, _)| l).collect();
        assert_eq!(locals, ["input/b.vtp", "input/a.vtp"]);
        assert_eq!(files.get("input/b.vtp"), Some("/b2"));
    }
}
