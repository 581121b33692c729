use std::sync::Arc;

use log::{debug, info, warn};

use super::collapse::CollapseState;
use super::config::ViewerConfig;
use super::dispatch::{self, ClickAction};
use super::layout::{ContainerSize, LayoutEngine, compute_layout};
use super::registry::{DiagramRegistry, RegistryError};
use super::store::SelectionStore;
use super::tooltip::{ScreenPoint, TooltipState};
use super::types::DiagramDefinition;

/// Values compared before and after a command to find out what changed.
struct Snapshot {
	diagram: String,
	collapse_revision: u64,
}

/// All mutable viewer state for one page.
///
/// Commands run to completion. After a command mutates the store or the
/// collapse state, the session reacts: a diagram change resets collapse
/// state and tooltip and invalidates layout from scratch; a collapse change
/// invalidates layout for the same diagram.
#[derive(Clone, Debug)]
pub struct DiagramSession {
	registry: Arc<DiagramRegistry>,
	config: ViewerConfig,
	store: SelectionStore,
	collapse: CollapseState,
	tooltip: TooltipState,
	layout: LayoutEngine,
	container: Option<ContainerSize>,
}

impl DiagramSession {
	/// Session starting on the configured root diagram.
	pub fn new(registry: Arc<DiagramRegistry>, config: ViewerConfig) -> Result<Self, RegistryError> {
		registry.require_root(&config.root_diagram)?;
		let root = config.root_diagram.clone();
		Ok(Self {
			registry,
			store: SelectionStore::new(root.clone()),
			collapse: CollapseState::new(root.clone()),
			tooltip: TooltipState::default(),
			layout: LayoutEngine::new(root),
			container: None,
			config,
		})
	}

	/// The diagram registry.
	pub fn registry(&self) -> &DiagramRegistry {
		&self.registry
	}

	/// Viewer tunables.
	pub fn config(&self) -> &ViewerConfig {
		&self.config
	}

	/// Selection and table state.
	pub fn store(&self) -> &SelectionStore {
		&self.store
	}

	/// Collapse state of the active diagram.
	pub fn collapse(&self) -> &CollapseState {
		&self.collapse
	}

	/// Hover tooltip.
	pub fn tooltip(&self) -> &TooltipState {
		&self.tooltip
	}

	/// Layout flags and latest result.
	pub fn layout(&self) -> &LayoutEngine {
		&self.layout
	}

	/// Last usable container measurement.
	pub fn container_size(&self) -> Option<ContainerSize> {
		self.container
	}

	/// Definition of the active diagram.
	pub fn active_diagram(&self) -> Option<&DiagramDefinition> {
		self.registry.lookup(self.store.active_diagram())
	}

	/// Whether the active diagram supports expand/collapse.
	pub fn is_tree_diagram(&self) -> bool {
		self.active_diagram().is_some_and(DiagramDefinition::is_tree)
	}

	/// Whether the root diagram is showing.
	pub fn is_root(&self) -> bool {
		self.store.active_diagram() == self.config.root_diagram
	}

	/// Handle a click on `node_id` in the active diagram.
	pub fn click_node(&mut self, node_id: &str) -> ClickAction {
		let Some(node) = self
			.active_diagram()
			.and_then(|diagram| diagram.node_by_id(node_id))
			.cloned()
		else {
			warn!(
				"click on `{node_id}`, which is not a node of `{}`",
				self.store.active_diagram()
			);
			return ClickAction::Ignore;
		};

		let action = dispatch::decide(&node, &self.registry, &self.store);
		let before = self.snapshot();
		dispatch::apply(&action, &mut self.store, &mut self.collapse);
		match &action {
			ClickAction::Ignore => debug!("no diagram registered for `{node_id}`"),
			other => debug!("click on `{node_id}`: {other:?}"),
		}
		self.observe(before);
		action
	}

	/// Expand every subtree of the active tree diagram.
	pub fn expand_all(&mut self) {
		self.set_all(false);
	}

	/// Collapse every subtree root of the active tree diagram.
	pub fn collapse_all(&mut self) {
		self.set_all(true);
	}

	fn set_all(&mut self, collapsed: bool) {
		let Some(definition) = self.registry.lookup(self.store.active_diagram()) else {
			return;
		};
		if !definition.is_tree() {
			return;
		}
		let before = self.snapshot();
		self.collapse.set_all(collapsed, definition);
		self.observe(before);
	}

	/// Switch to `diagram` and close any table. Returns `false` when no such
	/// diagram is registered.
	pub fn navigate_to(&mut self, diagram: &str) -> bool {
		if !self.registry.contains(diagram) {
			debug!("no diagram registered for `{diagram}`");
			return false;
		}
		let before = self.snapshot();
		self.store.navigate_and_clear_table(diagram);
		self.observe(before);
		true
	}

	/// Return to the root diagram.
	pub fn go_back(&mut self) {
		let root = self.config.root_diagram.clone();
		self.navigate_to(&root);
	}

	/// Close the table view.
	pub fn dismiss_table(&mut self) {
		self.store.clear_table();
	}

	/// Pointer entered `node_id` at viewport point `position`.
	pub fn node_enter(&mut self, node_id: &str, position: ScreenPoint) {
		let content = self
			.active_diagram()
			.and_then(|diagram| diagram.node_by_id(node_id))
			.and_then(|node| node.description.clone())
			.unwrap_or_default();
		self.tooltip.on_node_enter(node_id, content, position);
	}

	/// Pointer left the hovered node.
	pub fn node_leave(&mut self) {
		self.tooltip.on_node_leave();
	}

	/// Record a container measurement. A changed size re-lays out the
	/// active diagram without hiding it.
	pub fn set_container_size(&mut self, size: Option<ContainerSize>) {
		let Some(size) = size else {
			debug!("container not measurable; layout stays pending");
			return;
		};
		if self.container == Some(size) {
			return;
		}
		self.container = Some(size);
		if self.layout.has_layouted() {
			self.layout.invalidate();
		}
	}

	/// Run the outstanding layout pass, if any. Without a container
	/// measurement nothing happens and layout stays loading. Returns whether
	/// a result was accepted.
	pub fn run_pending_layout(&mut self) -> bool {
		if !self.layout.needs_pass() {
			return false;
		}
		let Some(size) = self.container else {
			debug!("no container measurement yet; deferring layout");
			return false;
		};
		let Some(definition) = self.registry.lookup(self.layout.target()) else {
			warn!("layout requested for unregistered diagram `{}`", self.layout.target());
			return false;
		};
		let ticket = self.layout.begin_pass();
		let result = compute_layout(definition, &self.collapse, size, &self.config);
		self.layout.complete_pass(&ticket, result)
	}

	fn snapshot(&self) -> Snapshot {
		Snapshot {
			diagram: self.store.active_diagram().to_owned(),
			collapse_revision: self.collapse.revision(),
		}
	}

	fn observe(&mut self, before: Snapshot) {
		let diagram = self.store.active_diagram();
		if diagram != before.diagram {
			info!("showing diagram `{diagram}`");
			let diagram = diagram.to_owned();
			self.collapse.reset(diagram.clone());
			self.tooltip.reset();
			self.layout.invalidate_diagram(diagram);
		} else if self.collapse.revision() != before.collapse_revision {
			self.layout.invalidate();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagram::types::{NodeDescriptor, TableData, TreeConfig};

	fn session() -> DiagramSession {
		let registry = DiagramRegistry::new([
			DiagramDefinition::new("root")
				.node(NodeDescriptor::new("A", "Area A").with_description("Drill into A"))
				.node(
					NodeDescriptor::new("t1", "Revenue")
						.with_table(TableData::new(["Year"], [vec!["2024".into()]])),
				),
			DiagramDefinition::new("A")
				.with_tree(TreeConfig::default())
				.node(NodeDescriptor::new("x1", "X1"))
				.node(NodeDescriptor::new("x2", "X2").with_parent("x1")),
		])
		.unwrap();
		DiagramSession::new(Arc::new(registry), ViewerConfig::default()).unwrap()
	}

	fn measured() -> Option<ContainerSize> {
		ContainerSize::measured(800.0, 600.0)
	}

	fn visible(session: &DiagramSession) -> Vec<String> {
		session
			.layout()
			.result()
			.map(|r| r.nodes.iter().map(|n| n.id.clone()).collect())
			.unwrap_or_default()
	}

	#[test]
	fn missing_root_is_rejected() {
		let registry = Arc::new(DiagramRegistry::new([DiagramDefinition::new("A")]).unwrap());
		assert_eq!(
			DiagramSession::new(registry, ViewerConfig::default()).unwrap_err(),
			RegistryError::MissingRoot("root".into())
		);
	}

	#[test]
	fn layout_waits_for_measurement() {
		let mut session = session();
		assert!(!session.run_pending_layout());
		session.set_container_size(None);
		assert!(!session.run_pending_layout());
		assert!(session.layout().is_loading_layout());
		assert!(!session.layout().has_layouted());

		session.set_container_size(measured());
		assert!(session.run_pending_layout());
		assert!(session.layout().has_layouted());
		assert!(!session.layout().is_loading_layout());
	}

	#[test]
	fn drill_collapse_expand_scenario() {
		let mut session = session();
		session.set_container_size(measured());
		session.run_pending_layout();

		assert_eq!(session.click_node("A"), ClickAction::Navigate("A".into()));
		assert_eq!(session.store().active_diagram(), "A");
		assert!(session.store().table().is_none());
		assert!(!session.layout().has_layouted());
		session.run_pending_layout();
		assert_eq!(visible(&session), ["x1", "x2"]);

		session.click_node("x1");
		assert!(session.collapse().is_collapsed("x1"));
		assert!(session.layout().has_layouted());
		assert!(session.layout().is_loading_layout());
		session.run_pending_layout();
		assert_eq!(visible(&session), ["x1"]);

		session.click_node("x1");
		assert!(session.collapse().is_empty());
		session.run_pending_layout();
		assert_eq!(visible(&session), ["x1", "x2"]);
	}

	#[test]
	fn navigation_resets_collapse_and_tooltip() {
		let mut session = session();
		session.navigate_to("A");
		session.click_node("x1");
		session.node_enter("x1", ScreenPoint::new(5.0, 5.0));
		assert!(session.tooltip().visible);

		session.go_back();
		assert!(session.is_root());
		assert!(session.collapse().is_empty());
		assert_eq!(session.collapse().diagram(), "root");
		assert!(!session.tooltip().visible);
		assert!(!session.layout().has_layouted());
	}

	#[test]
	fn expand_and_collapse_all() {
		let mut session = session();
		session.collapse_all();
		assert!(session.collapse().is_empty(), "root is not a tree");

		session.navigate_to("A");
		session.collapse_all();
		assert!(session.collapse().is_collapsed("x1"));
		assert!(session.layout().needs_pass());
		session.expand_all();
		assert!(session.collapse().is_empty());
	}

	#[test]
	fn tooltip_uses_node_description() {
		let mut session = session();
		session.node_enter("A", ScreenPoint::new(1.0, 2.0));
		assert_eq!(session.tooltip().content, "Drill into A");
		session.node_enter("t1", ScreenPoint::new(1.0, 2.0));
		assert_eq!(session.tooltip().content, "");
		session.node_leave();
		assert!(!session.tooltip().visible);
	}

	#[test]
	fn table_toggle_leaves_layout_alone() {
		let mut session = session();
		session.set_container_size(measured());
		session.run_pending_layout();

		session.click_node("t1");
		assert_eq!(session.store().table_title(), Some("Revenue"));
		assert!(!session.layout().needs_pass());
		session.dismiss_table();
		assert!(session.store().table().is_none() && session.store().table_title().is_none());
	}

	#[test]
	fn resize_relayouts_without_hiding() {
		let mut session = session();
		session.set_container_size(measured());
		session.run_pending_layout();

		session.set_container_size(ContainerSize::measured(1200.0, 600.0));
		assert!(session.layout().needs_pass());
		assert!(session.layout().has_layouted());
		session.set_container_size(ContainerSize::measured(1200.0, 600.0));
		assert!(session.run_pending_layout());
	}

	#[test]
	fn clicks_on_unknown_ids_are_ignored() {
		let mut session = session();
		assert_eq!(session.click_node("nope"), ClickAction::Ignore);
		assert!(!session.navigate_to("nope"));
		assert!(session.is_root());
	}

	#[test]
	fn unregistered_layout_target_keeps_pass_pending() {
		let mut session = session();
		session.set_container_size(measured());
		session.layout.invalidate_diagram("gone");
		assert!(!session.run_pending_layout());
		assert!(session.layout().needs_pass());

		session.layout.invalidate_diagram("root");
		assert!(session.run_pending_layout());
		assert!(!session.layout().is_loading_layout());
	}
}
