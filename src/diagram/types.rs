use std::collections::HashMap;
use std::sync::Arc;

/// Tabular dataset attached to a node. Its presence on a node makes a click
/// open or close the table instead of navigating.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableData {
	/// Column headers.
	pub columns: Vec<String>,
	/// Row cells, one `Vec` per row.
	pub rows: Vec<Vec<String>>,
}

impl TableData {
	/// Build a table from headers and rows.
	pub fn new<C, R>(columns: C, rows: R) -> Self
	where
		C: IntoIterator,
		C::Item: Into<String>,
		R: IntoIterator<Item = Vec<String>>,
	{
		Self {
			columns: columns.into_iter().map(Into::into).collect(),
			rows: rows.into_iter().collect(),
		}
	}
}

/// Rank direction for layered layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutDirection {
	#[default]
	/// Ranks stacked from top to bottom.
	TopBottom,
	/// Ranks laid out from left to right.
	LeftRight,
}

/// Positioning algorithm used for a diagram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutStrategy {
	#[default]
	/// Rank-based placement.
	Layered,
	/// Force-directed simulation.
	Force,
}

/// Marks a diagram as a collapsible tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeConfig {
	/// Direction in which the tree grows.
	pub direction: LayoutDirection,
}

/// A single node of a diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDescriptor {
	/// Unique within the parent diagram. May equal another diagram's id.
	pub id: String,
	/// Raw display label.
	pub label: String,
	/// Display-only label override, preferred for table titles.
	pub clean_label: Option<String>,
	/// Tooltip text.
	pub description: Option<String>,
	/// Optional table payload.
	pub table: Option<Arc<TableData>>,
	/// Parent node, only meaningful for tree diagrams.
	pub parent: Option<String>,
}

impl NodeDescriptor {
	/// A plain node with no table, description or parent.
	pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			clean_label: None,
			description: None,
			table: None,
			parent: None,
		}
	}

	/// Set the display-only label override.
	pub fn with_clean_label(mut self, label: impl Into<String>) -> Self {
		self.clean_label = Some(label.into());
		self
	}

	/// Set the tooltip text.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Attach a table payload.
	pub fn with_table(mut self, table: impl Into<Arc<TableData>>) -> Self {
		self.table = Some(table.into());
		self
	}

	/// Set the parent link.
	pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	/// Title shown for this node: the clean label if present, else the raw
	/// label. An empty clean label counts as absent.
	pub fn display_title(&self) -> &str {
		match self.clean_label.as_deref() {
			Some(clean) if !clean.is_empty() => clean,
			_ => &self.label,
		}
	}
}

/// A directed edge between two nodes of the same diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDescriptor {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Optional edge label.
	pub label: Option<String>,
}

impl EdgeDescriptor {
	/// An unlabeled edge.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			label: None,
		}
	}
}

/// Static topology of one navigable diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramDefinition {
	/// Registry key.
	pub id: String,
	/// Nodes in declaration order.
	pub nodes: Vec<NodeDescriptor>,
	/// Edges in declaration order.
	pub edges: Vec<EdgeDescriptor>,
	/// Present iff the diagram supports collapse/expand.
	pub tree: Option<TreeConfig>,
	/// How node positions are computed.
	pub layout: LayoutStrategy,
}

impl DiagramDefinition {
	/// An empty, non-tree diagram.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			nodes: Vec::new(),
			edges: Vec::new(),
			tree: None,
			layout: LayoutStrategy::default(),
		}
	}

	/// Mark the diagram as a collapsible tree.
	pub fn with_tree(mut self, tree: TreeConfig) -> Self {
		self.tree = Some(tree);
		self
	}

	/// Choose the layout strategy.
	pub fn with_layout(mut self, layout: LayoutStrategy) -> Self {
		self.layout = layout;
		self
	}

	/// Append a node.
	pub fn node(mut self, node: NodeDescriptor) -> Self {
		self.nodes.push(node);
		self
	}

	/// Append an unlabeled edge.
	pub fn edge(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
		self.edges.push(EdgeDescriptor::new(source, target));
		self
	}

	/// Whether the diagram carries tree configuration.
	pub fn is_tree(&self) -> bool {
		self.tree.is_some()
	}

	/// Look up a node by id.
	pub fn node_by_id(&self, id: &str) -> Option<&NodeDescriptor> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Children of each node, derived from parent links, in declaration order.
	/// Empty for non-tree diagrams.
	pub fn children(&self) -> HashMap<&str, Vec<&str>> {
		let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
		if !self.is_tree() {
			return children;
		}
		for node in &self.nodes {
			if let Some(parent) = node.parent.as_deref() {
				children.entry(parent).or_default().push(&node.id);
			}
		}
		children
	}
}
