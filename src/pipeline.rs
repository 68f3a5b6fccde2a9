//! Collect → extract → order → merge

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::collect::{self, Selection};
use crate::config::AmalgamateConfig;
use crate::extract;
use crate::graph::DependencyGraph;
use crate::merge;
use crate::report::Report;

/// Everything needed for one run
#[derive(Debug, Clone)]
pub struct Options {
    pub input_dir: PathBuf,
    pub output: PathBuf,
    pub selection: Selection,
    pub config: AmalgamateConfig,
}

/// Run a merge end to end.
///
/// Nothing is written unless ordering succeeds.
pub fn run(options: &Options) -> Result<Report> {
    let collection = collect::collect(
        &options.input_dir,
        &options.config.collect,
        &options.selection,
        Some(options.output.as_path()),
    )?;
    info!(
        files = collection.files.len(),
        modules = ?collection.modules,
        "collected headers"
    );

    let units = extract::load_units(&options.input_dir, &collection.files)?;
    let graph = DependencyGraph::build(&units, options.config.merge.missing_references)?;
    let order = graph.topological_sort()?;
    info!(order = ?order, "computed merge order");

    let content = merge::render(&order, units)?;
    let written = merge::write_atomic(&options.output, &content)?;

    Ok(Report::new(
        &options.output,
        collection.modules,
        &graph,
        order,
        written,
    ))
}
