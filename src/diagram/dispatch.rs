//! Node click decisions.
//!
//! [`decide`] maps a clicked node and the current selection to exactly one
//! [`ClickAction`]; [`apply`] performs it. Rules are tried in order and the
//! first match wins:
//!
//! 1. the node carries a table: open it, or close it if it is already open;
//! 2. the active diagram is a tree: toggle the node's subtree;
//! 3. a diagram is registered under the node's id: navigate there;
//! 4. nothing.

use std::sync::Arc;

use super::collapse::CollapseState;
use super::registry::DiagramRegistry;
use super::store::SelectionStore;
use super::types::{NodeDescriptor, TableData};

/// Outcome of a node click.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickAction {
	/// Show `table` under `title`, replacing any open table.
	OpenTable {
		/// Payload of the clicked node.
		table: Arc<TableData>,
		/// Display title of the clicked node.
		title: String,
	},
	/// The clicked node's table is already open; close it.
	CloseTable,
	/// Collapse or expand the subtree rooted at this node.
	ToggleSubtree(String),
	/// Switch to the diagram with this id.
	Navigate(String),
	/// The click has no defined action.
	Ignore,
}

/// Decide what a click on `node` does. Pure; reads only its arguments.
pub fn decide(
	node: &NodeDescriptor,
	registry: &DiagramRegistry,
	store: &SelectionStore,
) -> ClickAction {
	if let Some(table) = &node.table {
		let title = node.display_title();
		let already_open = store.table().is_some_and(|open| Arc::ptr_eq(open, table))
			&& store.table_title() == Some(title);
		return if already_open {
			ClickAction::CloseTable
		} else {
			ClickAction::OpenTable {
				table: Arc::clone(table),
				title: title.to_owned(),
			}
		};
	}

	let in_tree = registry
		.lookup(store.active_diagram())
		.is_some_and(|diagram| diagram.is_tree());
	if in_tree {
		return ClickAction::ToggleSubtree(node.id.clone());
	}

	if registry.contains(&node.id) {
		return ClickAction::Navigate(node.id.clone());
	}

	ClickAction::Ignore
}

/// Perform `action`. Only the store and the collapse state are touched.
pub fn apply(action: &ClickAction, store: &mut SelectionStore, collapse: &mut CollapseState) {
	match action {
		ClickAction::OpenTable { table, title } => {
			store.set_table(Some(Arc::clone(table)));
			store.set_table_title(Some(title.clone()));
		}
		ClickAction::CloseTable => store.clear_table(),
		ClickAction::ToggleSubtree(node) => {
			collapse.toggle(node);
		}
		ClickAction::Navigate(diagram) => store.navigate_and_clear_table(diagram.clone()),
		ClickAction::Ignore => {}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagram::types::{DiagramDefinition, TreeConfig};

	fn revenue() -> Arc<TableData> {
		Arc::new(TableData::new(
			["Year", "Revenue"],
			[vec!["2023".into(), "1.2M".into()]],
		))
	}

	fn registry() -> DiagramRegistry {
		DiagramRegistry::new([
			DiagramDefinition::new("root")
				.node(NodeDescriptor::new("A", "Area A"))
				.node(NodeDescriptor::new("t1", "Revenue").with_table(revenue()))
				.node(NodeDescriptor::new("lonely", "Lonely")),
			DiagramDefinition::new("A")
				.with_tree(TreeConfig::default())
				.node(NodeDescriptor::new("x1", "X1"))
				.node(NodeDescriptor::new("x2", "X2").with_parent("x1"))
				.node(NodeDescriptor::new("root", "Root")),
		])
		.unwrap()
	}

	fn node(registry: &DiagramRegistry, diagram: &str, id: &str) -> NodeDescriptor {
		registry
			.lookup(diagram)
			.and_then(|d| d.node_by_id(id))
			.cloned()
			.unwrap()
	}

	#[test]
	fn table_click_opens_then_closes() {
		let registry = registry();
		let t1 = node(&registry, "root", "t1");
		let mut store = SelectionStore::new("root");
		let mut collapse = CollapseState::new("root");

		let open = decide(&t1, &registry, &store);
		assert_eq!(
			open,
			ClickAction::OpenTable {
				table: revenue(),
				title: "Revenue".into()
			}
		);
		apply(&open, &mut store, &mut collapse);
		assert_eq!(store.table(), Some(&revenue()));
		assert_eq!(store.table_title(), Some("Revenue"));

		let close = decide(&t1, &registry, &store);
		assert_eq!(close, ClickAction::CloseTable);
		apply(&close, &mut store, &mut collapse);
		assert!(store.table().is_none() && store.table_title().is_none());
	}

	#[test]
	fn same_payload_under_another_title_replaces() {
		let registry = registry();
		let t1 = node(&registry, "root", "t1");
		let mut store = SelectionStore::new("root");
		store.set_table(Some(revenue()));
		store.set_table_title(Some("Costs".into()));
		assert!(matches!(
			decide(&t1, &registry, &store),
			ClickAction::OpenTable { ref title, .. } if title == "Revenue"
		));
	}

	#[test]
	fn equal_payload_on_another_node_replaces() {
		let registry = DiagramRegistry::new([DiagramDefinition::new("root")
			.node(NodeDescriptor::new("t1", "Revenue").with_table(revenue()))
			.node(NodeDescriptor::new("t2", "Revenue").with_table(revenue()))])
		.unwrap();
		let mut store = SelectionStore::new("root");
		let mut collapse = CollapseState::new("root");

		let first = decide(&node(&registry, "root", "t1"), &registry, &store);
		apply(&first, &mut store, &mut collapse);
		let second = decide(&node(&registry, "root", "t2"), &registry, &store);
		assert!(matches!(second, ClickAction::OpenTable { .. }));
		apply(&second, &mut store, &mut collapse);
		assert!(store.is_table_open());

		let t2 = registry.lookup("root").and_then(|d| d.node_by_id("t2")).unwrap();
		assert!(Arc::ptr_eq(store.table().unwrap(), t2.table.as_ref().unwrap()));
	}

	#[test]
	fn table_rule_wins_inside_trees() {
		let registry = registry();
		let store = SelectionStore::new("A");
		let with_table = NodeDescriptor::new("x1", "X1").with_table(revenue());
		assert!(matches!(
			decide(&with_table, &registry, &store),
			ClickAction::OpenTable { .. }
		));
	}

	#[test]
	fn tree_rule_wins_over_navigation() {
		let registry = registry();
		let store = SelectionStore::new("A");
		// "root" is also a registered diagram id.
		let root_node = node(&registry, "A", "root");
		assert_eq!(
			decide(&root_node, &registry, &store),
			ClickAction::ToggleSubtree("root".into())
		);
	}

	#[test]
	fn navigation_clears_table() {
		let registry = registry();
		let mut store = SelectionStore::new("root");
		let mut collapse = CollapseState::new("root");
		store.set_table(Some(revenue()));
		store.set_table_title(Some("Revenue".into()));

		let action = decide(&node(&registry, "root", "A"), &registry, &store);
		assert_eq!(action, ClickAction::Navigate("A".into()));
		apply(&action, &mut store, &mut collapse);
		assert_eq!(store.active_diagram(), "A");
		assert!(store.table().is_none() && store.table_title().is_none());
	}

	#[test]
	fn unknown_target_changes_nothing() {
		let registry = registry();
		let mut store = SelectionStore::new("root");
		let mut collapse = CollapseState::new("root");
		let (store_before, collapse_before) = (store.clone(), collapse.clone());

		let action = decide(&node(&registry, "root", "lonely"), &registry, &store);
		assert_eq!(action, ClickAction::Ignore);
		apply(&action, &mut store, &mut collapse);
		assert_eq!(store, store_before);
		assert_eq!(collapse, collapse_before);
	}
}
