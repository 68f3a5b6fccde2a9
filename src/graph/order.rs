//! Ordering: depth-first post-order topological sort

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::AmalgamateError;

/// Per-call traversal state: visited set plus post-order accumulator
#[derive(Debug, Default)]
pub struct Traversal<'g> {
    visited: HashSet<&'g str>,
    postorder: Vec<&'g str>,
}

impl<'g> Traversal<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit `root` and everything reachable from it that is still unvisited.
    ///
    /// Uses an explicit stack of (node, next dependent index) frames so deep
    /// include chains cannot exhaust the call stack. A node is pushed to the
    /// post-order only after all of its dependents.
    pub fn visit(&mut self, root: &'g str, edges: &'g BTreeMap<String, Vec<String>>) {
        if !self.visited.insert(root) {
            return;
        }

        let mut stack: Vec<(&'g str, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let dependents = edges.get(node).map(Vec::as_slice).unwrap_or_default();

            match dependents.get(next) {
                Some(dependent) => {
                    frame.1 += 1;
                    if self.visited.insert(dependent.as_str()) {
                        stack.push((dependent.as_str(), 0));
                    }
                }
                None => {
                    self.postorder.push(node);
                    stack.pop();
                }
            }
        }
    }

    /// Reverse the post-order into the candidate linear order
    pub fn into_order(self) -> Vec<String> {
        self.postorder.into_iter().rev().map(String::from).collect()
    }
}

/// Sort `nodes` so that every provider comes before its dependents.
///
/// Roots are taken in `nodes` order, which makes the result reproducible.
/// The candidate order is checked against every edge; any violation means
/// the graph has a cycle.
pub fn topological_order(
    nodes: &BTreeSet<String>,
    edges: &BTreeMap<String, Vec<String>>,
) -> Result<Vec<String>> {
    let mut traversal = Traversal::new();
    for node in nodes {
        traversal.visit(node, edges);
    }
    let order = traversal.into_order();

    let position: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut violations = Vec::new();
    for (provider, dependents) in edges {
        for dependent in dependents {
            match (position.get(provider.as_str()), position.get(dependent.as_str())) {
                (Some(p), Some(d)) if p < d => {}
                _ => violations.push((provider.clone(), dependent.clone())),
            }
        }
    }

    if !violations.is_empty() {
        return Err(AmalgamateError::CycleDetected { edges: violations }.into());
    }

    Ok(order)
}
