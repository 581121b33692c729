use super::config::ViewerConfig;
use super::layout::{Bounds, ContainerSize};

/// Pointer travel below which a background drag still counts as a click.
const CLICK_SLOP: f64 = 3.0;

/// Screen = graph * k + (x, y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal translation.
	pub x: f64,
	/// Vertical translation.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	/// Center `bounds` in `container`, zoomed to fit within the zoom limits.
	pub fn fit(bounds: &Bounds, container: ContainerSize, config: &ViewerConfig) -> Self {
		let (width, height) = (bounds.width().max(1.0), bounds.height().max(1.0));
		let avail_w = (container.width - 2.0 * config.padding).max(1.0);
		let avail_h = (container.height - 2.0 * config.padding).max(1.0);
		let k = (avail_w / width)
			.min(avail_h / height)
			.clamp(config.min_zoom, config.max_zoom);
		Self {
			x: container.width / 2.0 - (bounds.min_x + width / 2.0) * k,
			y: container.height / 2.0 - (bounds.min_y + height / 2.0) * k,
			k,
		}
	}

	/// Map a container-relative point into graph coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Shift by a screen-space delta.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.x += dx;
		self.y += dy;
	}

	/// Zoom by `factor` keeping screen point `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, min: f64, max: f64) {
		let new_k = (self.k * factor).clamp(min, max);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Background drag in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanState {
	/// Whether a drag is underway.
	pub active: bool,
	/// Whether the pointer moved past the click slop.
	pub moved: bool,
	start_x: f64,
	start_y: f64,
	transform_start_x: f64,
	transform_start_y: f64,
}

impl PanState {
	/// A button went down anywhere on the canvas. Forgets any drag that
	/// ended without a click, e.g. one released outside the canvas.
	pub fn press(&mut self) {
		self.moved = false;
	}

	/// Begin dragging at `(x, y)`.
	pub fn begin(&mut self, x: f64, y: f64, transform: &ViewTransform) {
		*self = Self {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			transform_start_x: transform.x,
			transform_start_y: transform.y,
		};
	}

	/// Move the drag to `(x, y)`, updating `transform`.
	pub fn drag_to(&mut self, x: f64, y: f64, transform: &mut ViewTransform) {
		if !self.active {
			return;
		}
		let (dx, dy) = (x - self.start_x, y - self.start_y);
		if dx.hypot(dy) > CLICK_SLOP {
			self.moved = true;
		}
		transform.x = self.transform_start_x + dx;
		transform.y = self.transform_start_y + dy;
	}

	/// Stop dragging.
	pub fn end(&mut self) {
		self.active = false;
	}

	/// Whether the last gesture should be treated as a click. Clears the
	/// moved flag.
	pub fn take_click(&mut self) -> bool {
		!std::mem::take(&mut self.moved)
	}
}
