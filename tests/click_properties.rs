//! Property tests for node click handling.
//!
//! Verifies:
//! 1. Table nodes: open, then close on a second click.
//! 2. Tree diagrams: a subtree toggle is its own inverse.
//! 3. Navigation always clears the table.
//! 4. Clicks with no defined action change nothing.
//! 5. Navigation resets collapse state, tooltip and layout readiness.
//! 6. Table payload and title stay paired across any click sequence.

use std::sync::Arc;

use interactive_diagram::diagram::{
	ClickAction, ContainerSize, DiagramDefinition, DiagramRegistry, DiagramSession,
	NodeDescriptor, ScreenPoint, TableData, TreeConfig, ViewerConfig,
};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_label() -> impl Strategy<Value = String> {
	"[A-Za-z][A-Za-z0-9 ]{0,12}"
}

fn arb_table() -> impl Strategy<Value = TableData> {
	(
		prop::collection::vec(arb_label(), 1..4),
		prop::collection::vec(prop::collection::vec(arb_label(), 1..4), 0..5),
	)
		.prop_map(|(columns, rows)| TableData { columns, rows })
}

/// Parent index for each node after the first; every parent precedes its child.
fn arb_tree_parents() -> impl Strategy<Value = Vec<usize>> {
	(1usize..12).prop_flat_map(|n| {
		(1..n)
			.map(|child| (0..child).boxed())
			.collect::<Vec<_>>()
	})
}

fn tree_diagram(parents: &[usize]) -> DiagramDefinition {
	let mut diagram = DiagramDefinition::new("tree")
		.with_tree(TreeConfig::default())
		.node(NodeDescriptor::new("n0", "N0"));
	for (offset, parent) in parents.iter().enumerate() {
		let id = offset + 1;
		diagram = diagram
			.node(NodeDescriptor::new(format!("n{id}"), format!("N{id}")).with_parent(format!("n{parent}")));
	}
	diagram
}

fn root_with(nodes: Vec<NodeDescriptor>) -> DiagramDefinition {
	nodes
		.into_iter()
		.fold(DiagramDefinition::new("root"), DiagramDefinition::node)
}

fn session(diagrams: Vec<DiagramDefinition>) -> DiagramSession {
	let registry = DiagramRegistry::new(diagrams).expect("valid registry");
	DiagramSession::new(Arc::new(registry), ViewerConfig::default()).expect("root present")
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
	#[test]
	fn table_click_opens_then_closes(
		table in arb_table(),
		label in arb_label(),
		clean in prop::option::of(arb_label()),
	) {
		let mut node = NodeDescriptor::new("t1", label.clone()).with_table(table.clone());
		node.clean_label = clean.clone();
		let title = clean.filter(|c| !c.is_empty()).unwrap_or(label);
		let mut session = session(vec![root_with(vec![node])]);

		session.click_node("t1");
		prop_assert_eq!(session.store().table().map(|t| &**t), Some(&table));
		prop_assert_eq!(session.store().table_title(), Some(title.as_str()));

		session.click_node("t1");
		prop_assert!(session.store().table().is_none());
		prop_assert!(session.store().table_title().is_none());
	}

	#[test]
	fn subtree_toggle_is_its_own_inverse(parents in arb_tree_parents(), pick in any::<prop::sample::Index>()) {
		let diagram = tree_diagram(&parents);
		let target = pick.get(&diagram.nodes).id.clone();
		let mut session = session(vec![root_with(vec![]), diagram]);
		session.navigate_to("tree");
		session.collapse_all();
		let before = session.collapse().clone();

		let first = session.click_node(&target);
		prop_assert_eq!(first, ClickAction::ToggleSubtree(target.clone()));
		prop_assert_ne!(
			session.collapse().is_collapsed(&target),
			before.is_collapsed(&target)
		);
		session.click_node(&target);

		let mut now: Vec<_> = session.collapse().iter().collect();
		let mut was: Vec<_> = before.iter().collect();
		now.sort_unstable();
		was.sort_unstable();
		prop_assert_eq!(now, was);
	}

	#[test]
	fn navigation_clears_table(table_open in any::<bool>(), table in arb_table()) {
		let revenue = NodeDescriptor::new("t1", "Revenue").with_table(table);
		let target = NodeDescriptor::new("A", "Area A");
		let mut session = session(vec![
			root_with(vec![revenue, target]),
			DiagramDefinition::new("A"),
		]);
		if table_open {
			session.click_node("t1");
			prop_assert!(session.store().is_table_open());
		}

		prop_assert_eq!(session.click_node("A"), ClickAction::Navigate("A".into()));
		prop_assert_eq!(session.store().active_diagram(), "A");
		prop_assert!(session.store().table().is_none());
		prop_assert!(session.store().table_title().is_none());
	}

	#[test]
	fn unmatched_click_changes_nothing(id in "[a-z]{1,8}") {
		prop_assume!(id != "root");
		let mut session = session(vec![root_with(vec![NodeDescriptor::new(id.clone(), "X")])]);
		let (store, collapse) = (session.store().clone(), session.collapse().clone());

		prop_assert_eq!(session.click_node(&id), ClickAction::Ignore);
		prop_assert_eq!(session.store(), &store);
		prop_assert_eq!(session.collapse(), &collapse);
	}

	#[test]
	fn navigation_resets_view_state(parents in arb_tree_parents(), pick in any::<prop::sample::Index>()) {
		let diagram = tree_diagram(&parents);
		let target = pick.get(&diagram.nodes).id.clone();
		let mut session = session(vec![root_with(vec![NodeDescriptor::new("tree", "Tree")]), diagram]);
		session.set_container_size(ContainerSize::measured(800.0, 600.0));
		session.run_pending_layout();

		session.click_node("tree");
		session.run_pending_layout();
		session.click_node(&target);
		session.node_enter(&target, ScreenPoint::new(3.0, 4.0));
		prop_assert!(session.layout().has_layouted());

		session.go_back();
		prop_assert!(session.collapse().is_empty());
		prop_assert!(!session.tooltip().visible);
		prop_assert!(!session.layout().has_layouted());
		prop_assert!(session.run_pending_layout());
		prop_assert!(session.layout().has_layouted());
	}

	#[test]
	fn table_fields_stay_paired(clicks in prop::collection::vec(0usize..3, 0..20)) {
		let nodes = vec![
			NodeDescriptor::new("t1", "Revenue").with_table(TableData::new(["A"], [vec!["1".to_owned()]])),
			NodeDescriptor::new("t2", "Costs").with_table(TableData::new(["B"], [vec!["2".to_owned()]])),
			NodeDescriptor::new("A", "Area A"),
		];
		let ids = ["t1", "t2", "A"];
		let mut session = session(vec![root_with(nodes), DiagramDefinition::new("A")]);
		for click in clicks {
			if !session.is_root() {
				session.go_back();
			}
			session.click_node(ids[click]);
			prop_assert!(session.store().is_table_paired());
		}
	}
}
