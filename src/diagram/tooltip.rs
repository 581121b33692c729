/// A point in viewport (client) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
	/// Horizontal offset in CSS pixels.
	pub x: f64,
	/// Vertical offset in CSS pixels.
	pub y: f64,
}

impl ScreenPoint {
	/// Construct from coordinates.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Hover tooltip. Transitions are immediate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
	/// Whether the tooltip is showing.
	pub visible: bool,
	/// Where to draw it.
	pub position: ScreenPoint,
	/// Text to show, possibly empty.
	pub content: String,
	node: Option<String>,
}

impl TooltipState {
	/// Show `content` for `node` at `position`.
	pub fn on_node_enter(
		&mut self,
		node: impl Into<String>,
		content: impl Into<String>,
		position: ScreenPoint,
	) {
		self.visible = true;
		self.node = Some(node.into());
		self.content = content.into();
		self.position = position;
	}

	/// Hide the tooltip.
	pub fn on_node_leave(&mut self) {
		self.visible = false;
		self.node = None;
	}

	/// Hide and forget everything.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Node currently under the pointer, if any.
	pub fn hovered_node(&self) -> Option<&str> {
		self.node.as_deref()
	}
}
