//! Rebuild hierarchical call trees from a flat span list.
//!
//! The dashboard API returns a trace's spans as a flat array in storage
//! order. This module turns that into a forest of owned [`SpanNode`]
//! trees in two O(n) passes: first an id -> slot index, then parent
//! resolution in input order.
//!
//! Reconstruction never fails. A span whose parent is missing, in
//! another trace, or part of a parent cycle degrades to a root; a
//! repeated `span_id` overwrites the index entry (last-write-wins)
//! while every input span still gets its own node.

use crate::parser::schema::{Span, SpanNode};
use log::debug;
use std::collections::HashMap;

/// Build a forest of call trees from a flat span list.
///
/// # Arguments
/// * `spans` - Spans in arbitrary order; no uniqueness requirement
///
/// # Returns
/// Root nodes in input order. Children of each node preserve the input
/// order of their spans. Every input span appears exactly once across
/// the returned forest, whatever shape the parent references are in.
pub fn build_span_forest(spans: &[Span]) -> Vec<SpanNode> {
    if spans.is_empty() {
        return Vec::new();
    }

    debug!("Building span forest from {} spans", spans.len());

    // Pass 1: span_id -> slot index. A repeated id overwrites the entry,
    // so lookups resolve to the last occurrence; earlier occurrences keep
    // their own slots and surface through parent resolution below.
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(spans.len());
    let mut duplicates = 0usize;
    for (slot, span) in spans.iter().enumerate() {
        if index.insert(span.span_id.as_str(), slot).is_some() {
            duplicates += 1;
        }
    }
    if duplicates > 0 {
        debug!("Encountered {} duplicate span ids (last one wins)", duplicates);
    }

    // Pass 2: resolve parents in input order. An owned tree cannot hold a
    // cycle, so an attachment that would close one (self-parent included)
    // demotes the span to a root, same as a dangling reference.
    let mut parent_of: Vec<Option<usize>> = vec![None; spans.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); spans.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (slot, span) in spans.iter().enumerate() {
        let resolved = span
            .parent_id
            .as_deref()
            .and_then(|parent_id| index.get(parent_id).copied());

        match resolved {
            Some(parent) if parent != slot && !closes_cycle(parent, slot, &parent_of) => {
                parent_of[slot] = Some(parent);
                children[parent].push(slot);
            }
            _ => roots.push(slot),
        }
    }

    // Assemble owned trees from the slot arena
    let mut nodes: Vec<Option<SpanNode>> = spans
        .iter()
        .map(|span| Some(SpanNode::from_span(span)))
        .collect();

    let forest: Vec<SpanNode> = roots
        .into_iter()
        .filter_map(|root| assemble(root, &mut nodes, &children))
        .collect();

    debug!("Built {} root trees", forest.len());

    forest
}

/// Check whether attaching `child` under `parent` would close a cycle.
///
/// Walks parent links assigned so far; those are acyclic by construction,
/// so the walk terminates in at most the current tree depth.
fn closes_cycle(parent: usize, child: usize, parent_of: &[Option<usize>]) -> bool {
    let mut current = Some(parent);
    while let Some(slot) = current {
        if slot == child {
            return true;
        }
        current = parent_of[slot];
    }
    false
}

/// Move a slot and its attached children out of the arena.
fn assemble(
    slot: usize,
    nodes: &mut Vec<Option<SpanNode>>,
    children: &[Vec<usize>],
) -> Option<SpanNode> {
    let mut node = nodes[slot].take()?;
    node.children = children[slot]
        .iter()
        .filter_map(|&child| assemble(child, nodes, children))
        .collect();
    node.has_children = !node.children.is_empty();
    Some(node)
}
