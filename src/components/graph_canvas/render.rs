use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, VERTEX_RADIUS};
use crate::traversal::EdgeMode;

const BACKGROUND: &str = "#ffffff";
const INK: &str = "#000000";
const VISITED_FILL: &str = "#ffff00";
const VISITED_BORDER: &str = "#ff0000";
const WEIGHT_COLOR: &str = "#0000ff";
const ARROW_SIZE: f64 = 10.0;

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_vertices(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions();
	ctx.set_stroke_style_str(INK);
	ctx.set_fill_style_str(INK);
	ctx.set_line_width(2.0);

	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};

		if edge.source == edge.target {
			draw_self_loop(ctx, x1, y1, state.mode);
			if let Some(label) = &edge.label {
				draw_weight(ctx, label, x1, y1 - VERTEX_RADIUS * 2.6);
			}
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = dx.hypot(dy);
		if dist < 2.0 * VERTEX_RADIUS {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let directed = state.mode == EdgeMode::Directed;
		let head = if directed { ARROW_SIZE } else { 0.0 };

		ctx.begin_path();
		ctx.move_to(x1 + ux * VERTEX_RADIUS, y1 + uy * VERTEX_RADIUS);
		ctx.line_to(
			x2 - ux * (VERTEX_RADIUS + head),
			y2 - uy * (VERTEX_RADIUS + head),
		);
		ctx.stroke();

		if directed {
			let (tip_x, tip_y) = (x2 - ux * VERTEX_RADIUS, y2 - uy * VERTEX_RADIUS);
			draw_arrowhead(ctx, tip_x, tip_y, ux, uy);
		}

		if let Some(label) = &edge.label {
			// Sit the label just off the middle of the line.
			let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
			draw_weight(ctx, label, mx - uy * 12.0, my + ux * 12.0);
		}
	}
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tip_x: f64, tip_y: f64, ux: f64, uy: f64) {
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_self_loop(ctx: &CanvasRenderingContext2d, x: f64, y: f64, mode: EdgeMode) {
	let (cx, cy, r) = (x, y - VERTEX_RADIUS * 1.5, VERTEX_RADIUS * 0.8);
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, r, 0.0, 2.0 * PI);
	ctx.stroke();
	if mode == EdgeMode::Directed {
		// Lands on the right shoulder of the vertex, pointing down-left.
		let (ux, uy) = (-0.6, 0.8);
		draw_arrowhead(ctx, x + VERTEX_RADIUS * 0.6, y - VERTEX_RADIUS * 0.8, ux, uy);
	}
}

fn draw_weight(ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64) {
	ctx.set_font("bold 16px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_stroke_style_str(BACKGROUND);
	ctx.set_line_width(3.0);
	let _ = ctx.stroke_text(label, x, y);
	ctx.set_fill_style_str(WEIGHT_COLOR);
	let _ = ctx.fill_text(label, x, y);
	ctx.set_stroke_style_str(INK);
	ctx.set_fill_style_str(INK);
	ctx.set_line_width(2.0);
}

fn draw_vertices(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("18px sans-serif");

	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let id = &node.data.user_data.id;
		let (fill, border, width) = if state.is_highlighted(id) {
			(VISITED_FILL, VISITED_BORDER, 3.0)
		} else {
			(BACKGROUND, INK, 2.0)
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, VERTEX_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		ctx.set_stroke_style_str(border);
		ctx.set_line_width(width);
		ctx.stroke();

		ctx.set_fill_style_str(INK);
		let _ = ctx.fill_text(id, x, y);
	});
}
