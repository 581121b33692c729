use std::collections::HashSet;

use super::types::DiagramDefinition;

/// Collapsed subtree roots of one diagram.
///
/// The set is keyed by the diagram it belongs to, so ids from a previously
/// active diagram never leak into the next one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollapseState {
	diagram: String,
	collapsed: HashSet<String>,
	revision: u64,
}

impl CollapseState {
	/// Empty state for `diagram`.
	pub fn new(diagram: impl Into<String>) -> Self {
		Self {
			diagram: diagram.into(),
			..Self::default()
		}
	}

	/// Diagram this state is scoped to.
	pub fn diagram(&self) -> &str {
		&self.diagram
	}

	/// Bumped on every mutation, for change detection.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Rescope to `diagram` with nothing collapsed.
	pub fn reset(&mut self, diagram: impl Into<String>) {
		self.diagram = diagram.into();
		self.collapsed.clear();
		self.revision += 1;
	}

	/// Whether `node` is collapsed in the scoped diagram.
	pub fn is_collapsed(&self, node: &str) -> bool {
		self.collapsed.contains(node)
	}

	/// Flip `node`'s membership. Returns whether it is now collapsed.
	pub fn toggle(&mut self, node: &str) -> bool {
		self.revision += 1;
		if self.collapsed.remove(node) {
			false
		} else {
			self.collapsed.insert(node.to_owned());
			true
		}
	}

	/// Expand everything, or collapse every node that has a child.
	/// No-op for diagrams without tree configuration.
	pub fn set_all(&mut self, collapsed: bool, definition: &DiagramDefinition) {
		if !definition.is_tree() {
			return;
		}
		if definition.id != self.diagram {
			self.diagram = definition.id.clone();
		}
		self.collapsed.clear();
		if collapsed {
			self.collapsed
				.extend(definition.children().into_keys().map(str::to_owned));
		}
		self.revision += 1;
	}

	/// Number of collapsed nodes.
	pub fn len(&self) -> usize {
		self.collapsed.len()
	}

	/// Whether nothing is collapsed.
	pub fn is_empty(&self) -> bool {
		self.collapsed.is_empty()
	}

	/// Collapsed node ids, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.collapsed.iter().map(String::as_str)
	}
}
