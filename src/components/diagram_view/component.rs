use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlDivElement, MouseEvent, WheelEvent,
};

use super::render;
use super::scroll::scroll_to_selector;
use super::table::TableView;
use super::tooltip::DiagramTooltip;
use crate::diagram::{
	ContainerSize, DiagramSession, MessageCatalog, PanState, ScreenPoint, TextLookup,
	ViewTransform, diagram_name_key,
};

const WRAPPER_SELECTOR: &str = ".diagram-container-wrapper";

fn measure(container: &HtmlDivElement) -> Option<ContainerSize> {
	ContainerSize::measured(container.client_width() as f64, container.client_height() as f64)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

/// Pointer position relative to the canvas.
fn local_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	ev: &MouseEvent,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn node_at(
	session: RwSignal<DiagramSession>,
	transform: ViewTransform,
	x: f64,
	y: f64,
) -> Option<String> {
	let (gx, gy) = transform.screen_to_graph(x, y);
	session.with_untracked(|s| {
		s.layout()
			.result()
			.and_then(|layout| layout.node_at(gx, gy))
			.map(|node| node.id.clone())
	})
}

/// Interactive diagram: header, toolbar, canvas, tooltip and table.
#[component]
pub fn DiagramView(
	session: DiagramSession,
	#[prop(optional)] messages: MessageCatalog,
) -> impl IntoView {
	let config = session.config().clone();
	let session = RwSignal::new(session);
	let messages = StoredValue::new(messages);
	let transform = RwSignal::new(ViewTransform::default());
	let pan = StoredValue::new(PanState::default());
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	// Layout runs after the container is in the DOM and can be measured.
	let fit_config = config.clone();
	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if !session.with(|s| s.layout().needs_pass()) {
			return;
		}
		let Some(size) = measure(&container) else {
			debug!("diagram container has no size yet");
			return;
		};
		let fresh = session.with_untracked(|s| !s.layout().has_layouted());
		let mut fitted = None;
		session.update(|s| {
			s.set_container_size(Some(size));
			if s.run_pending_layout() && fresh {
				fitted = s
					.layout()
					.result()
					.map(|layout| ViewTransform::fit(&layout.bounds, size, &fit_config));
			}
		});
		if let Some(fit) = fitted {
			transform.set(fit);
		}
	});

	let resize_init = resize_cb.clone();
	Effect::new(move |_| {
		if resize_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		let cb: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(container) = container_ref.get_untracked() else {
				return;
			};
			if let Some(size) = measure(&container) {
				session.update(|s| s.set_container_size(Some(size)));
			}
		});
		let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		*resize_init.borrow_mut() = Some(cb);
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let view = transform.get();
		session.with(|s| {
			let (Some(layout), Some(size)) = (s.layout().result(), s.container_size()) else {
				return;
			};
			canvas.set_width(size.width as u32);
			canvas.set_height(size.height as u32);
			let Some(ctx) = context_2d(&canvas) else {
				return;
			};
			render::render(layout, &view, size, s.tooltip().hovered_node(), &ctx);
		});
	});

	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		pan.update_value(|p| p.press());
		let current = transform.get_untracked();
		// Nodes are not draggable; only the background pans.
		if node_at(session, current, x, y).is_none() {
			pan.update_value(|p| p.begin(x, y, &current));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if pan.with_value(|p| p.active) {
			transform.update(|t| pan.update_value(|p| p.drag_to(x, y, t)));
			return;
		}

		let hovered = node_at(session, transform.get_untracked(), x, y);
		let current = session.with_untracked(|s| s.tooltip().hovered_node().map(str::to_owned));
		if hovered == current {
			return;
		}
		let position = ScreenPoint::new(ev.client_x() as f64, ev.client_y() as f64);
		session.update(|s| {
			s.node_leave();
			if let Some(id) = &hovered {
				s.node_enter(id, position);
			}
		});
	};

	let on_mouseup = move |_: MouseEvent| {
		pan.update_value(|p| p.end());
	};

	let on_mouseleave = move |_: MouseEvent| {
		pan.update_value(|p| p.end());
		if session.with_untracked(|s| s.tooltip().visible) {
			session.update(|s| s.node_leave());
		}
	};

	let on_click = move |ev: MouseEvent| {
		ev.prevent_default();
		let mut is_click = true;
		pan.update_value(|p| is_click = p.take_click());
		if !is_click {
			return;
		}
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(id) = node_at(session, transform.get_untracked(), x, y) {
			session.update(|s| {
				s.click_node(&id);
			});
		}
	};

	let (min_zoom, max_zoom) = (config.min_zoom, config.max_zoom);
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if ev.ctrl_key() {
			let Some((x, y)) = local_point(canvas_ref, &ev) else {
				return;
			};
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			transform.update(|t| t.zoom_at(x, y, factor, min_zoom, max_zoom));
		} else {
			transform.update(|t| t.pan_by(-ev.delta_x(), -ev.delta_y()));
		}
	};

	let header_offset = config.scroll_header_offset;
	let on_close = Callback::new(move |_: ()| {
		scroll_to_selector(WRAPPER_SELECTOR, header_offset);
		session.update(|s| s.dismiss_table());
	});

	let label = move |key: &str, default: &str| messages.with_value(|m| m.text(key, default));
	let root = config.root_diagram.clone();
	let diagram_name = move || {
		let id = session.with(|s| s.store().active_diagram().to_owned());
		messages.with_value(|m| m.text(&diagram_name_key(&id, &root), &id))
	};
	let container_class = move || {
		let loading = session.with(|s| !s.layout().has_layouted() || s.layout().is_loading_layout());
		if loading {
			"diagram-canvas-container is-loading"
		} else {
			"diagram-canvas-container loaded"
		}
	};
	let canvas_style = move || {
		if session.with(|s| s.layout().has_layouted()) {
			"display: block; cursor: pointer;"
		} else {
			"display: none;"
		}
	};
	let table = move || {
		session
			.with(|s| {
				let title = s.store().table_title().unwrap_or_default().to_owned();
				s.store().table().cloned().map(|table| (table, title))
			})
			.map(|(table, title)| view! { <TableView table=table title=title on_close=on_close /> })
	};

	view! {
		<div class="box diagram-container-wrapper">
			<p class="title is-4 has-text-centered">
				{label("diagram_title", "Data overview")} ": " {diagram_name}
			</p>

			<div class="has-text-right mb-4">
				<div class="field has-addons diagram-buttons-responsive">
					<Show when=move || session.with(|s| s.is_tree_diagram())>
						<button
							type="button"
							class="button is-light"
							on:click=move |_| session.update(|s| s.expand_all())
						>
							{label("diagram_expand_all", "Expand all")}
						</button>
						<button
							type="button"
							class="button is-light"
							on:click=move |_| session.update(|s| s.collapse_all())
						>
							{label("diagram_collapse_all", "Collapse all")}
						</button>
					</Show>
					<Show when=move || !session.with(|s| s.is_root())>
						<button
							type="button"
							class="button is-light"
							aria-label=label("diagram_back_button", "Back to overview")
							on:click=move |_| session.update(|s| s.go_back())
						>
							{label("diagram_back_button", "Back to overview")}
						</button>
					</Show>
				</div>
			</div>

			<div class="diagram-layout-container">
				<div
					node_ref=container_ref
					class=container_class
					style="position: relative; height: 70vh;"
				>
					<Show when=move || !session.with(|s| s.layout().has_layouted())>
						<p class="loading-text">
							{label("diagram_loading", "Computing layout...")}
						</p>
					</Show>
					<canvas
						node_ref=canvas_ref
						class="diagram-canvas"
						style=canvas_style
						on:click=on_click
						on:mousedown=on_mousedown
						on:mousemove=on_mousemove
						on:mouseup=on_mouseup
						on:mouseleave=on_mouseleave
						on:wheel=on_wheel
					/>
					<DiagramTooltip session=session />
				</div>

				{table}
			</div>
		</div>
	}
}
