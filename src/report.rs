//! Run summary, printed as text or JSON

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::graph::{DependencyGraph, DroppedReference};
use crate::merge::MergedOutput;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub provider: String,
    pub dependent: String,
}

/// What a merge run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub output: String,
    /// Optional modules that were merged
    pub modules: Vec<String>,
    /// Headers in merge order
    pub order: Vec<String>,
    pub edges: Vec<Edge>,
    pub dropped_references: Vec<DroppedReference>,
    pub bytes: usize,
    pub sha256: String,
}

impl Report {
    pub fn new(
        output: &Path,
        modules: Vec<String>,
        graph: &DependencyGraph,
        order: Vec<String>,
        written: MergedOutput,
    ) -> Self {
        Self {
            output: output.display().to_string(),
            modules,
            order,
            edges: graph
                .edges()
                .map(|(provider, dependent)| Edge {
                    provider: provider.to_string(),
                    dependent: dependent.to_string(),
                })
                .collect(),
            dropped_references: graph.dropped_references().to_vec(),
            bytes: written.bytes,
            sha256: written.sha256,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human readable summary
    pub fn to_text(&self) -> String {
        let mut providers: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for edge in &self.edges {
            providers
                .entry(edge.dependent.as_str())
                .or_default()
                .push(edge.provider.as_str());
        }

        let mut out = format!(
            "{} Merged {} headers into {} ({} bytes)\n",
            "✓".green().bold(),
            self.order.len(),
            self.output.bold(),
            self.bytes
        );

        if !self.modules.is_empty() {
            out.push_str(&format!("  modules: {}\n", self.modules.join(", ")));
        }

        out.push_str("  order:\n");
        let width = self.order.len().to_string().len();
        for (i, id) in self.order.iter().enumerate() {
            out.push_str(&format!("    {:>width$}. {id}", i + 1));
            if let Some(deps) = providers.get(id.as_str()) {
                out.push_str(&format!(" ← {}", deps.join(", ")).dimmed().to_string());
            }
            out.push('\n');
        }

        if !self.dropped_references.is_empty() {
            out.push_str(&format!("  {}\n", "dropped includes:".yellow()));
            for dropped in &self.dropped_references {
                out.push_str(&format!(
                    "    {} {} (from {})\n",
                    "?".yellow().bold(),
                    dropped.reference,
                    dropped.included_by
                ));
            }
        }

        out.push_str(&format!("  sha256: {}\n", self.sha256));
        out
    }
}
