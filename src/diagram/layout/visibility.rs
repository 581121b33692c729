use std::collections::{HashMap, HashSet};

use crate::diagram::collapse::CollapseState;
use crate::diagram::types::{DiagramDefinition, NodeDescriptor};

pub(super) struct VisibleEdge<'a> {
	pub source: &'a str,
	pub target: &'a str,
	pub label: Option<&'a str>,
}

/// Nodes and edges that survive the collapse state.
pub(super) struct VisibleGraph<'a> {
	pub nodes: Vec<&'a NodeDescriptor>,
	pub edges: Vec<VisibleEdge<'a>>,
	pub children: HashMap<&'a str, Vec<&'a str>>,
	pub tree: bool,
	collapsed: HashSet<&'a str>,
}

impl VisibleGraph<'_> {
	pub fn is_collapsed(&self, id: &str) -> bool {
		self.collapsed.contains(id)
	}
}

pub(super) fn visible_graph<'a>(
	definition: &'a DiagramDefinition,
	collapse: &CollapseState,
) -> VisibleGraph<'a> {
	let tree = definition.is_tree();
	// A collapse set scoped to another diagram counts as empty.
	let collapsed: HashSet<&str> = if tree && collapse.diagram() == definition.id {
		definition
			.nodes
			.iter()
			.map(|node| node.id.as_str())
			.filter(|id| collapse.is_collapsed(id))
			.collect()
	} else {
		HashSet::new()
	};

	let parents: HashMap<&str, &str> = if tree {
		definition
			.nodes
			.iter()
			.filter_map(|node| Some((node.id.as_str(), node.parent.as_deref()?)))
			.collect()
	} else {
		HashMap::new()
	};
	let hidden = |id: &str| {
		let mut cursor = parents.get(id).copied();
		// Bounded walk; malformed parent cycles terminate.
		for _ in 0..definition.nodes.len() {
			let Some(parent) = cursor else {
				return false;
			};
			if collapsed.contains(parent) {
				return true;
			}
			cursor = parents.get(parent).copied();
		}
		false
	};

	let nodes: Vec<&NodeDescriptor> = definition
		.nodes
		.iter()
		.filter(|node| !hidden(node.id.as_str()))
		.collect();
	let visible: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();

	let mut seen = HashSet::new();
	let mut edges = Vec::new();
	for edge in &definition.edges {
		let (source, target) = (edge.source.as_str(), edge.target.as_str());
		if visible.contains(source) && visible.contains(target) && seen.insert((source, target)) {
			edges.push(VisibleEdge {
				source,
				target,
				label: edge.label.as_deref(),
			});
		}
	}
	for node in &nodes {
		let Some(&parent) = parents.get(node.id.as_str()) else {
			continue;
		};
		if visible.contains(parent) && seen.insert((parent, node.id.as_str())) {
			edges.push(VisibleEdge {
				source: parent,
				target: node.id.as_str(),
				label: None,
			});
		}
	}

	VisibleGraph {
		nodes,
		edges,
		children: definition.children(),
		tree,
		collapsed,
	}
}
