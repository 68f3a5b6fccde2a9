//! Include directive extraction
//!
//! Only one textual form is recognized: a line starting with
//! `#include "..."`. Angle-bracket includes are system headers and never
//! create edges. Conditional compilation is not evaluated, so a directive
//! inside a disabled `#if` block still counts as a dependency.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static INCLUDE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^#include "([^"]*)""#).expect("include directive regex is valid")
});

/// A collected file and its text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUnit {
    pub id: String,
    pub content: String,
}

impl FileUnit {
    /// Local include references in this file, in directive order
    pub fn references(&self) -> Vec<String> {
        extract_references(&self.content)
    }
}

/// Read every collected file once
pub fn load_units(root: &Path, ids: &[String]) -> Result<Vec<FileUnit>> {
    ids.iter()
        .map(|id| {
            let path = root.join(id);
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read header: {}", path.display()))?;
            Ok(FileUnit {
                id: id.clone(),
                content,
            })
        })
        .collect()
}

/// Extract local include references, normalized to `/` separators
pub fn extract_references(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(include_target)
        .map(normalize_reference)
        .collect()
}

/// Whether a line is a local include directive
pub fn is_include_directive(line: &str) -> bool {
    include_target(line).is_some()
}

fn include_target(line: &str) -> Option<&str> {
    INCLUDE_DIRECTIVE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Bring a reference to the canonical separator used for identifiers
pub fn normalize_reference(reference: &str) -> String {
    reference.replace('\\', "/")
}
