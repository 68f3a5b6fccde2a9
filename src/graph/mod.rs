//! Include graph: which headers must be merged before which

mod order;


use anyhow::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

use crate::config::MissingReferencePolicy;
use crate::error::AmalgamateError;
use crate::extract::FileUnit;

pub use order::{topological_order, Traversal};

/// A quoted include that names a file outside the merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedReference {
    pub reference: String,
    pub included_by: String,
}

/// Dependency graph over collected headers
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Every collected identifier
    nodes: BTreeSet<String>,
    /// Adjacency list: header -> headers that include it
    edges: BTreeMap<String, Vec<String>>,
    /// References dropped under [`MissingReferencePolicy::Ignore`]
    dropped: Vec<DroppedReference>,
}

impl DependencyGraph {
    /// Build the graph from loaded files.
    ///
    /// Edges are added in file order, then directive order. A reference to
    /// a file that is not part of the merge is handled by `policy`.
    pub fn build(units: &[FileUnit], policy: MissingReferencePolicy) -> Result<Self> {
        let mut graph = Self {
            nodes: units.iter().map(|u| u.id.clone()).collect(),
            ..Self::default()
        };

        for unit in units {
            for reference in unit.references() {
                if graph.nodes.contains(&reference) {
                    graph.add_edge(&reference, &unit.id);
                    continue;
                }

                match policy {
                    MissingReferencePolicy::Error => {
                        return Err(AmalgamateError::MissingFile {
                            reference,
                            included_by: unit.id.clone(),
                        }
                        .into());
                    }
                    MissingReferencePolicy::Ignore => {
                        warn!(
                            reference = %reference,
                            included_by = %unit.id,
                            "include not part of the merge, dropping edge"
                        );
                        graph.dropped.push(DroppedReference {
                            reference,
                            included_by: unit.id.clone(),
                        });
                    }
                }
            }
        }

        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edge_count(),
            "built include graph"
        );

        Ok(graph)
    }

    /// Record that `provider` must come before `dependent`.
    ///
    /// Both must already be nodes. Re-adding an edge is a no-op.
    fn add_edge(&mut self, provider: &str, dependent: &str) {
        let dependents = self.edges.entry(provider.to_string()).or_default();
        if !dependents.iter().any(|d| d == dependent) {
            dependents.push(dependent.to_string());
        }
    }

    /// Produce a linear order where every provider precedes its dependents
    pub fn topological_sort(&self) -> Result<Vec<String>> {
        topological_order(&self.nodes, &self.edges)
    }

    /// Identifiers in sorted order
    pub fn nodes(&self) -> impl Iterator<Item = &String> {
        self.nodes.iter()
    }

    /// Headers that include `id`
    pub fn dependents(&self, id: &str) -> &[String] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// All (provider, dependent) edges, providers sorted
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().flat_map(|(provider, dependents)| {
            dependents
                .iter()
                .map(move |dependent| (provider.as_str(), dependent.as_str()))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn dropped_references(&self) -> &[DroppedReference] {
        &self.dropped
    }
}
