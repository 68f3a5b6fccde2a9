//! Merging ordered headers into a single output file

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::extract::{is_include_directive, FileUnit};

/// Result of writing the merged header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOutput {
    pub bytes: usize,
    /// Hex SHA-256 of the written content
    pub sha256: String,
}

/// Concatenate `units` in `order`, dropping local include lines.
///
/// Units are separated by one blank line. A unit left empty once its
/// directives are gone contributes nothing, separator included. Every unit
/// named in `order` must be present in `units`.
pub fn render(order: &[String], units: Vec<FileUnit>) -> Result<String> {
    let mut by_id: HashMap<String, String> =
        units.into_iter().map(|u| (u.id, u.content)).collect();

    let mut out = String::new();
    for id in order {
        let content = by_id
            .remove(id)
            .ok_or_else(|| anyhow::anyhow!("Header not loaded: {id}"))?;

        let stripped = strip_directives(&content);
        if stripped.is_empty() {
            debug!(header = %id, "header empty after stripping includes");
            continue;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&stripped);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    Ok(out)
}

/// Remove every local include line, line ending included
pub fn strip_directives(content: &str) -> String {
    content
        .split_inclusive('\n')
        .filter(|line| !is_include_directive(line))
        .collect()
}

/// Write `content` to `output` in one step.
///
/// The content goes to a temporary file next to the target, which is then
/// renamed over it. If anything fails the target is left untouched.
pub fn write_atomic(output: &Path, content: &str) -> Result<MergedOutput> {
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut staging = NamedTempFile::new_in(parent).with_context(|| {
        format!(
            "Failed to create temp file in output directory: {}",
            parent.display()
        )
    })?;
    staging
        .write_all(content.as_bytes())
        .context("Failed to write merged header")?;
    staging
        .as_file()
        .sync_all()
        .context("Failed to sync merged header to disk")?;
    staging
        .persist(output)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    debug!(output = %output.display(), bytes = content.len(), "wrote merged header");

    Ok(MergedOutput {
        bytes: content.len(),
        sha256: hex::encode(Sha256::digest(content.as_bytes())),
    })
}
