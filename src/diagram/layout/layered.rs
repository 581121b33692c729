use std::collections::{HashMap, HashSet};

use super::ContainerSize;
use super::visibility::VisibleGraph;
use crate::diagram::config::ViewerConfig;
use crate::diagram::types::LayoutDirection;

/// Center of each visible node, in `graph.nodes` order.
pub(super) fn place(
	graph: &VisibleGraph<'_>,
	direction: LayoutDirection,
	size: ContainerSize,
	config: &ViewerConfig,
) -> Vec<(f64, f64)> {
	let ranks = if graph.tree {
		tree_ranks(graph)
	} else {
		edge_ranks(graph)
	};
	let Some(&deepest) = ranks.iter().max() else {
		return Vec::new();
	};
	let mut members = vec![Vec::new(); deepest + 1];
	for idx in order(graph) {
		members[ranks[idx]].push(idx);
	}

	let (main_extent, cross_extent, cross_container) = match direction {
		LayoutDirection::TopBottom => (config.node_height, config.node_width, size.width),
		LayoutDirection::LeftRight => (config.node_width, config.node_height, size.height),
	};
	let mut positions = vec![(0.0, 0.0); graph.nodes.len()];
	for (rank, row) in members.iter().enumerate() {
		if row.is_empty() {
			continue;
		}
		let main = config.padding + rank as f64 * (main_extent + config.rank_gap) + main_extent / 2.0;
		let span = row.len() as f64 * cross_extent + (row.len() - 1) as f64 * config.node_gap;
		let start = ((cross_container - span) / 2.0).max(config.padding);
		for (slot, &idx) in row.iter().enumerate() {
			let cross = start + slot as f64 * (cross_extent + config.node_gap) + cross_extent / 2.0;
			positions[idx] = match direction {
				LayoutDirection::TopBottom => (cross, main),
				LayoutDirection::LeftRight => (main, cross),
			};
		}
	}
	positions
}

fn index<'a>(graph: &VisibleGraph<'a>) -> HashMap<&'a str, usize> {
	graph
		.nodes
		.iter()
		.enumerate()
		.map(|(idx, node)| (node.id.as_str(), idx))
		.collect()
}

/// Depth below the nearest root.
fn tree_ranks(graph: &VisibleGraph<'_>) -> Vec<usize> {
	let index = index(graph);
	graph
		.nodes
		.iter()
		.map(|node| {
			let mut depth = 0;
			let mut cursor = node.parent.as_deref();
			while let Some(&parent) = cursor.and_then(|id| index.get(id)) {
				depth += 1;
				if depth >= graph.nodes.len() {
					break;
				}
				cursor = graph.nodes[parent].parent.as_deref();
			}
			depth
		})
		.collect()
}

/// Longest path from a source, capped so cycles terminate.
fn edge_ranks(graph: &VisibleGraph<'_>) -> Vec<usize> {
	let index = index(graph);
	let n = graph.nodes.len();
	let mut ranks = vec![0; n];
	for _ in 0..n {
		let mut changed = false;
		for edge in &graph.edges {
			let (Some(&source), Some(&target)) = (index.get(edge.source), index.get(edge.target))
			else {
				continue;
			};
			let candidate = ranks[source] + 1;
			if candidate > ranks[target] && candidate < n {
				ranks[target] = candidate;
				changed = true;
			}
		}
		if !changed {
			break;
		}
	}
	ranks
}

/// Slot order within ranks: preorder for trees so siblings stay together,
/// declaration order otherwise.
fn order(graph: &VisibleGraph<'_>) -> Vec<usize> {
	if !graph.tree {
		return (0..graph.nodes.len()).collect();
	}
	let index = index(graph);
	let mut out = Vec::with_capacity(graph.nodes.len());
	let mut seen = HashSet::new();
	let mut stack = Vec::new();
	for (idx, node) in graph.nodes.iter().enumerate() {
		let rooted = node
			.parent
			.as_deref()
			.is_some_and(|parent| index.contains_key(parent));
		if !rooted {
			stack.push(idx);
		}
		// Anything unreachable from a root (parent cycles) is appended last.
		while let Some(current) = stack.pop() {
			if !seen.insert(current) {
				continue;
			}
			out.push(current);
			if let Some(children) = graph.children.get(graph.nodes[current].id.as_str()) {
				stack.extend(children.iter().rev().filter_map(|id| index.get(id).copied()));
			}
		}
	}
	out.extend((0..graph.nodes.len()).filter(|idx| !seen.contains(idx)));
	out
}
