use log::debug;

use super::LayoutResult;

/// Handle for one layout pass. A pass whose ticket is older than the
/// engine's latest invalidation is discarded on completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutTicket {
	generation: u64,
	diagram: String,
}

impl LayoutTicket {
	/// Diagram the pass was issued for.
	pub fn diagram(&self) -> &str {
		&self.diagram
	}

	/// Invalidation count at issue time.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

/// Tracks when the active diagram needs a new layout pass and holds the
/// latest accepted result.
#[derive(Clone, Debug, Default)]
pub struct LayoutEngine {
	generation: u64,
	target: String,
	dirty: bool,
	in_flight: Option<LayoutTicket>,
	has_layouted: bool,
	result: Option<LayoutResult>,
}

impl LayoutEngine {
	/// Engine with a pass pending for `diagram`.
	pub fn new(diagram: impl Into<String>) -> Self {
		let mut engine = Self::default();
		engine.invalidate_diagram(diagram);
		engine
	}

	/// A different diagram became active: drop the old result and hide
	/// content until the next pass completes.
	pub fn invalidate_diagram(&mut self, diagram: impl Into<String>) {
		self.generation += 1;
		self.target = diagram.into();
		self.dirty = true;
		self.has_layouted = false;
		self.result = None;
	}

	/// Same diagram, different visible set or container: re-layout while
	/// the previous result stays on screen.
	pub fn invalidate(&mut self) {
		self.generation += 1;
		self.dirty = true;
	}

	/// Diagram the next pass is for.
	pub fn target(&self) -> &str {
		&self.target
	}

	/// Whether a pass still has to be started.
	pub fn needs_pass(&self) -> bool {
		self.dirty
	}

	/// Start a pass for the current target.
	pub fn begin_pass(&mut self) -> LayoutTicket {
		let ticket = LayoutTicket {
			generation: self.generation,
			diagram: self.target.clone(),
		};
		self.dirty = false;
		self.in_flight = Some(ticket.clone());
		ticket
	}

	/// Accept `result` unless a newer invalidation superseded `ticket`.
	/// Returns whether the result was accepted.
	pub fn complete_pass(&mut self, ticket: &LayoutTicket, result: LayoutResult) -> bool {
		if self.in_flight.as_ref() == Some(ticket) {
			self.in_flight = None;
		}
		if ticket.generation != self.generation || ticket.diagram != self.target {
			debug!(
				"discarding stale layout pass {} for `{}`",
				ticket.generation, ticket.diagram
			);
			return false;
		}
		self.result = Some(result);
		self.has_layouted = true;
		true
	}

	/// Whether a pass is outstanding, either not yet started or in flight.
	pub fn is_loading_layout(&self) -> bool {
		self.dirty || self.in_flight.is_some()
	}

	/// Whether a pass completed for the current diagram.
	pub fn has_layouted(&self) -> bool {
		self.has_layouted
	}

	/// Latest accepted result for the current diagram.
	pub fn result(&self) -> Option<&LayoutResult> {
		self.result.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagram::layout::Bounds;

	fn result(diagram: &str) -> LayoutResult {
		LayoutResult {
			diagram: diagram.into(),
			nodes: Vec::new(),
			edges: Vec::new(),
			bounds: Bounds::default(),
		}
	}

	#[test]
	fn pass_lifecycle_sets_flags() {
		let mut engine = LayoutEngine::new("root");
		assert!(engine.needs_pass());
		assert!(engine.is_loading_layout());
		assert!(!engine.has_layouted());

		let ticket = engine.begin_pass();
		assert!(!engine.needs_pass());
		assert!(engine.is_loading_layout());

		assert!(engine.complete_pass(&ticket, result("root")));
		assert!(!engine.is_loading_layout());
		assert!(engine.has_layouted());
		assert_eq!(engine.result().map(|r| r.diagram.as_str()), Some("root"));
	}

	#[test]
	fn collapse_invalidation_keeps_previous_result() {
		let mut engine = LayoutEngine::new("A");
		let ticket = engine.begin_pass();
		engine.complete_pass(&ticket, result("A"));

		engine.invalidate();
		assert!(engine.has_layouted());
		assert!(engine.is_loading_layout());
		assert!(engine.result().is_some());
	}

	#[test]
	fn stale_pass_for_previous_diagram_is_discarded() {
		let mut engine = LayoutEngine::new("root");
		let stale = engine.begin_pass();
		engine.invalidate_diagram("A");
		let fresh = engine.begin_pass();

		assert!(!engine.complete_pass(&stale, result("root")));
		assert!(!engine.has_layouted());
		assert!(engine.result().is_none());
		assert!(engine.is_loading_layout());

		assert!(engine.complete_pass(&fresh, result("A")));
		assert_eq!(engine.result().map(|r| r.diagram.as_str()), Some("A"));
	}

	#[test]
	fn superseded_collapse_pass_is_discarded() {
		let mut engine = LayoutEngine::new("A");
		let first = engine.begin_pass();
		engine.complete_pass(&first, result("A"));

		let older = {
			engine.invalidate();
			engine.begin_pass()
		};
		engine.invalidate();
		assert!(!engine.complete_pass(&older, result("A")));
		assert!(engine.needs_pass());
	}
}
