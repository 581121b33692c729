/// Identifier of the diagram shown on first load.
pub const ROOT_DIAGRAM_ID: &str = "root";

/// Tunables for the viewer. Distances are CSS pixels in graph space.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
	/// Diagram shown on load and by "back to overview".
	pub root_diagram: String,
	/// Node box width.
	pub node_width: f64,
	/// Node box height.
	pub node_height: f64,
	/// Gap between neighbours in one rank.
	pub node_gap: f64,
	/// Gap between consecutive ranks.
	pub rank_gap: f64,
	/// Margin kept around the laid-out diagram.
	pub padding: f64,
	/// Lower zoom bound.
	pub min_zoom: f64,
	/// Upper zoom bound.
	pub max_zoom: f64,
	/// Simulation steps for force-directed diagrams.
	pub force_iterations: usize,
	/// Space left for a sticky page header when scrolling back to the diagram.
	pub scroll_header_offset: f64,
	/// Distance between pointer and tooltip.
	pub tooltip_offset: f64,
}

impl Default for ViewerConfig {
	fn default() -> Self {
		Self {
			root_diagram: ROOT_DIAGRAM_ID.to_owned(),
			node_width: 160.0,
			node_height: 48.0,
			node_gap: 32.0,
			rank_gap: 72.0,
			padding: 24.0,
			min_zoom: 0.6,
			max_zoom: 2.0,
			force_iterations: 300,
			scroll_header_offset: 80.0,
			tooltip_offset: 12.0,
		}
	}
}

impl ViewerConfig {
	/// Use a different root diagram.
	pub fn with_root(mut self, root: impl Into<String>) -> Self {
		self.root_diagram = root.into();
		self
	}
}
