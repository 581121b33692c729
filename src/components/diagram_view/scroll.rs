use log::debug;

/// Scroll the window so the first element matching `selector` sits
/// `header_offset` pixels below the top of the viewport.
pub fn scroll_to_selector(selector: &str, header_offset: f64) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let Some(element) = window
		.document()
		.and_then(|document| document.query_selector(selector).ok().flatten())
	else {
		debug!("nothing matches `{selector}`; not scrolling");
		return;
	};
	let top = element.get_bounding_client_rect().top() + window.scroll_y().unwrap_or(0.0);
	window.scroll_to_with_x_and_y(0.0, (top - header_offset).max(0.0));
}
