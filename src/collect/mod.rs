//! File collection: find the headers that take part in a merge
//!
//! Core directories are merged unconditionally. Files in the module
//! directory are optional and filtered through a [`Selection`].
//! Identifiers are root-relative and always `/`-separated so they compare
//! equal to the references extracted from include directives.

pub mod selection;

use anyhow::{bail, Context, Result};
use glob::{glob, Pattern};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use crate::config::CollectConfig;

pub use selection::Selection;

/// Files chosen for a merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Identifiers of every collected file, sorted
    pub files: Vec<String>,
    /// Names of the optional modules that were selected, sorted
    pub modules: Vec<String>,
}

/// Collect candidate files under `root`.
///
/// Missing core or module directories contribute nothing. A missing root is
/// an error. `output`, when it lies under `root`, is never collected so a
/// previous merge is not fed back into the next one.
pub fn collect(
    root: &Path,
    config: &CollectConfig,
    selection: &Selection,
    output: Option<&Path>,
) -> Result<Collection> {
    if !root.is_dir() {
        bail!("Input directory not found: {}", root.display());
    }
    Pattern::new(&config.pattern)
        .with_context(|| format!("Invalid file pattern '{}'", config.pattern))?;

    let output = output.and_then(canonical_target);
    let is_output = |path: &Path| {
        let hit = output.is_some() && path.canonicalize().ok() == output;
        if hit {
            debug!(path = %path.display(), "skipping output file");
        }
        hit
    };

    let mut files = BTreeSet::new();

    for dir in &config.core_dirs {
        for path in list_dir(root, dir, &config.pattern)? {
            if !is_output(&path) {
                files.insert(identifier(root, &path)?);
            }
        }
    }

    let mut modules = BTreeSet::new();
    if let Some(module_dir) = config.module_dir.as_deref().filter(|d| !d.is_empty()) {
        let mut available = BTreeSet::new();
        for path in list_dir(root, module_dir, &config.pattern)? {
            if is_output(&path) {
                continue;
            }
            let Some(name) = module_name(&path) else {
                continue;
            };
            available.insert(name.clone());
            if selection.admits(&name) {
                files.insert(identifier(root, &path)?);
                modules.insert(name);
            }
        }

        if let Some(named) = selection.named() {
            for name in named.difference(&available) {
                warn!(module = %name, dir = %module_dir, "selected module not found");
            }
        }
    }

    debug!(files = files.len(), modules = modules.len(), "collected files");

    Ok(Collection {
        files: files.into_iter().collect(),
        modules: modules.into_iter().collect(),
    })
}

/// Convert a path under `root` into a `/`-separated identifier
pub fn identifier(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).with_context(|| {
        format!(
            "Path {} is outside the input directory {}",
            path.display(),
            root.display()
        )
    })?;

    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    Ok(parts.join("/"))
}

/// Canonical form of a path that may not exist yet.
///
/// Resolves the parent directory and re-attaches the file name. `None` when
/// the parent cannot be resolved, in which case the path cannot be under the
/// input root either.
fn canonical_target(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = path.canonicalize() {
        return Some(resolved);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}

/// Regular files directly inside `root/dir` whose names match `pattern`
fn list_dir(root: &Path, dir: &str, pattern: &str) -> Result<Vec<PathBuf>> {
    let base = root.join(dir);
    if !base.is_dir() {
        debug!(dir = %base.display(), "skipping missing directory");
        return Ok(Vec::new());
    }

    let escaped = Pattern::escape(&base.to_string_lossy());
    let full_pattern = Path::new(&escaped).join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let entries = glob(&pattern_str)
        .map_err(|e| anyhow::anyhow!("Invalid glob pattern '{pattern}': {e}"))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.with_context(|| format!("Failed to list {}", base.display()))?;
        if path.is_file() {
            paths.push(path);
        }
    }

    Ok(paths)
}

/// Module name of an optional header: its file name without extension
fn module_name(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}
