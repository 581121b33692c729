use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::diagram::layout::{LayoutNode, LayoutResult};
use crate::diagram::{ContainerSize, ViewTransform};

const ARROW_SIZE: f64 = 8.0;
const EDGE_COLOR: &str = "rgba(74, 85, 104, 0.8)";
const BORDER_COLOR: &str = "#3273dc";
const TEXT_COLOR: &str = "#363636";

pub fn render(
	layout: &LayoutResult,
	transform: &ViewTransform,
	size: ContainerSize,
	hovered: Option<&str>,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.clear_rect(0.0, 0.0, size.width, size.height);
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	draw_edges(layout, ctx);
	for node in &layout.nodes {
		draw_node(node, hovered == Some(node.id.as_str()), ctx);
	}
	ctx.restore();
}

/// Distance from a box center to its border along unit direction `(ux, uy)`.
fn border_distance(node: &LayoutNode, ux: f64, uy: f64) -> f64 {
	let (hw, hh) = (node.width / 2.0, node.height / 2.0);
	let tx = if ux.abs() > f64::EPSILON { hw / ux.abs() } else { f64::INFINITY };
	let ty = if uy.abs() > f64::EPSILON { hh / uy.abs() } else { f64::INFINITY };
	tx.min(ty)
}

fn draw_edges(layout: &LayoutResult, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_fill_style_str(EDGE_COLOR);
	ctx.set_line_width(1.5);

	for edge in &layout.edges {
		let (Some(from), Some(to)) = (layout.node(&edge.source), layout.node(&edge.target)) else {
			continue;
		};
		let (dx, dy) = (to.x - from.x, to.y - from.y);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let start = border_distance(from, ux, uy);
		let end = border_distance(to, ux, uy);
		if start + end >= dist {
			continue;
		}

		let (tip_x, tip_y) = (to.x - ux * end, to.y - uy * end);
		ctx.begin_path();
		ctx.move_to(from.x + ux * start, from.y + uy * start);
		ctx.line_to(tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		ctx.stroke();

		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if let Some(label) = &edge.label {
			ctx.set_font("11px sans-serif");
			ctx.set_text_align("center");
			ctx.set_text_baseline("bottom");
			let _ = ctx.fill_text(label, (from.x + to.x) / 2.0, (from.y + to.y) / 2.0 - 2.0);
		}
	}
}

fn draw_node(node: &LayoutNode, hovered: bool, ctx: &CanvasRenderingContext2d) {
	let rect = node.rect();
	let fill = if node.has_table {
		"#fff7e6"
	} else if node.has_children {
		"#eef6fc"
	} else {
		"#ffffff"
	};
	ctx.set_fill_style_str(fill);
	ctx.fill_rect(rect.min_x, rect.min_y, node.width, node.height);

	// Collapsed subtree roots get a dashed border.
	if node.collapsed {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(6.0),
			&JsValue::from_f64(3.0),
		));
	}
	ctx.set_stroke_style_str(BORDER_COLOR);
	ctx.set_line_width(if hovered { 2.5 } else { 1.0 });
	ctx.stroke_rect(rect.min_x, rect.min_y, node.width, node.height);
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_font("13px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text_with_max_width(&node.label, node.x, node.y, node.width - 24.0);

	if node.has_children {
		let marker = if node.collapsed { "+" } else { "\u{2212}" };
		ctx.set_font("bold 14px sans-serif");
		let _ = ctx.fill_text(marker, rect.max_x - 10.0, node.y);
	}
}
