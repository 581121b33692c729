//! Visibility and placement of the active diagram's nodes.
//!
//! Results are always recomputed from `(DiagramDefinition, CollapseState)`
//! and never patched. [`LayoutEngine`] tracks whether a pass is outstanding
//! and discards passes that finish after a newer invalidation.

mod engine;
mod force;
mod layered;
mod visibility;

use super::collapse::CollapseState;
use super::config::ViewerConfig;
use super::types::{DiagramDefinition, LayoutDirection, LayoutStrategy};

pub use engine::{LayoutEngine, LayoutTicket};

/// Measured size of the host container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerSize {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl ContainerSize {
	/// A usable measurement, or `None` for a zero, negative or non-finite box.
	pub fn measured(width: f64, height: f64) -> Option<Self> {
		let usable = |v: f64| v.is_finite() && v > 0.0;
		(usable(width) && usable(height)).then_some(Self { width, height })
	}
}

/// Axis-aligned box in graph coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub min_x: f64,
	/// Top edge.
	pub min_y: f64,
	/// Right edge.
	pub max_x: f64,
	/// Bottom edge.
	pub max_y: f64,
}

impl Bounds {
	/// Horizontal extent.
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	/// Vertical extent.
	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	fn around<'a>(nodes: impl IntoIterator<Item = &'a LayoutNode>) -> Self {
		let mut nodes = nodes.into_iter();
		let Some(first) = nodes.next() else {
			return Self::default();
		};
		nodes.fold(first.rect(), |acc, node| {
			let rect = node.rect();
			Self {
				min_x: acc.min_x.min(rect.min_x),
				min_y: acc.min_y.min(rect.min_y),
				max_x: acc.max_x.max(rect.max_x),
				max_y: acc.max_y.max(rect.max_y),
			}
		})
	}
}

/// A visible node with its computed position.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	/// Node id.
	pub id: String,
	/// Label drawn inside the box.
	pub label: String,
	/// Center x.
	pub x: f64,
	/// Center y.
	pub y: f64,
	/// Box width.
	pub width: f64,
	/// Box height.
	pub height: f64,
	/// Whether the node is a subtree root in a tree diagram.
	pub has_children: bool,
	/// Whether the node's subtree is hidden.
	pub collapsed: bool,
	/// Whether clicking toggles a table.
	pub has_table: bool,
}

impl LayoutNode {
	/// Bounding box of the node.
	pub fn rect(&self) -> Bounds {
		Bounds {
			min_x: self.x - self.width / 2.0,
			min_y: self.y - self.height / 2.0,
			max_x: self.x + self.width / 2.0,
			max_y: self.y + self.height / 2.0,
		}
	}

	/// Whether graph point `(x, y)` falls inside the box.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		let rect = self.rect();
		(rect.min_x..=rect.max_x).contains(&x) && (rect.min_y..=rect.max_y).contains(&y)
	}
}

/// An edge between two visible nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutEdge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Optional edge label.
	pub label: Option<String>,
}

/// Output of one layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
	/// Diagram the pass was computed for.
	pub diagram: String,
	/// Visible nodes, in declaration order.
	pub nodes: Vec<LayoutNode>,
	/// Edges whose endpoints are both visible.
	pub edges: Vec<LayoutEdge>,
	/// Box around all nodes.
	pub bounds: Bounds,
}

impl LayoutResult {
	/// Visible node with the given id.
	pub fn node(&self, id: &str) -> Option<&LayoutNode> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Topmost node under graph point `(x, y)`.
	pub fn node_at(&self, x: f64, y: f64) -> Option<&LayoutNode> {
		self.nodes.iter().rev().find(|node| node.contains(x, y))
	}
}

/// Run a full layout pass for `definition` under `collapse`.
pub fn compute_layout(
	definition: &DiagramDefinition,
	collapse: &CollapseState,
	size: ContainerSize,
	config: &ViewerConfig,
) -> LayoutResult {
	let graph = visibility::visible_graph(definition, collapse);
	let positions = match definition.layout {
		LayoutStrategy::Layered => {
			let direction = definition
				.tree
				.as_ref()
				.map(|tree| tree.direction)
				.unwrap_or(LayoutDirection::TopBottom);
			layered::place(&graph, direction, size, config)
		}
		LayoutStrategy::Force => force::place(&graph, size, config),
	};

	let nodes: Vec<LayoutNode> = graph
		.nodes
		.iter()
		.zip(positions)
		.map(|(node, (x, y))| {
			let has_children = graph.children.contains_key(node.id.as_str());
			LayoutNode {
				id: node.id.clone(),
				label: node.label.clone(),
				x,
				y,
				width: config.node_width,
				height: config.node_height,
				has_children,
				collapsed: has_children && graph.is_collapsed(&node.id),
				has_table: node.table.is_some(),
			}
		})
		.collect();
	let edges = graph
		.edges
		.iter()
		.map(|edge| LayoutEdge {
			source: edge.source.to_owned(),
			target: edge.target.to_owned(),
			label: edge.label.map(str::to_owned),
		})
		.collect();

	LayoutResult {
		diagram: definition.id.clone(),
		bounds: Bounds::around(&nodes),
		nodes,
		edges,
	}
}
