use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::traversal::{EdgeMode, Graph, HighlightState, VertexId};

pub const VERTEX_RADIUS: f64 = 20.0;
const MIN_RING_RADIUS: f64 = 120.0;
const MIN_ZOOM: f64 = 0.2;
const MAX_ZOOM: f64 = 5.0;

#[derive(Clone, Debug, Default)]
pub struct VertexInfo {
	pub id: VertexId,
}

#[derive(Clone, Debug)]
pub struct EdgeLine {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

/// What the pointer is doing between mousedown and mouseup.
#[derive(Clone, Debug, Default)]
pub enum Gesture {
	#[default]
	Idle,
	Drag {
		node: DefaultNodeIdx,
		offset_x: f64,
		offset_y: f64,
	},
	Pan {
		start_x: f64,
		start_y: f64,
		origin_x: f64,
		origin_y: f64,
	},
}

pub struct CanvasState {
	pub graph: ForceGraph<VertexInfo, ()>,
	pub edges: Vec<EdgeLine>,
	pub transform: ViewTransform,
	pub gesture: Gesture,
	pub highlight: HighlightState,
	pub mode: EdgeMode,
	pub width: f64,
	pub height: f64,
}

fn simulation() -> ForceGraph<VertexInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 6000.0,
		force_spring: 0.02,
		force_max: 200.0,
		node_speed: 2000.0,
		damping_factor: 0.85,
	})
}

impl CanvasState {
	pub fn new(data: &Graph, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			gesture: Gesture::Idle,
			highlight: HighlightState::default(),
			mode: EdgeMode::default(),
			width,
			height,
		};
		state.load(data);
		state
	}

	/// Replaces the drawn graph, laying vertices out on a circle around the
	/// origin. Pan and zoom are kept.
	pub fn load(&mut self, data: &Graph) {
		self.graph = simulation();
		self.edges.clear();
		self.gesture = Gesture::Idle;

		let count = data.vertex_count().max(1) as f64;
		let ring = (count * VERTEX_RADIUS * 3.0 / (2.0 * PI)).max(MIN_RING_RADIUS);
		let mut id_to_idx = HashMap::new();

		for (i, id) in data.vertices().iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let idx = self.graph.add_node(NodeData {
				x: (ring * angle.cos()) as f32,
				y: (ring * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: VertexInfo { id: id.clone() },
			});
			id_to_idx.insert(id.as_str(), idx);
		}

		for edge in data.edges() {
			let (Some(&source), Some(&target)) = (
				id_to_idx.get(edge.source.as_str()),
				id_to_idx.get(edge.target.as_str()),
			) else {
				continue;
			};
			if source != target {
				self.graph.add_edge(source, target, EdgeData::default());
			}
			self.edges.push(EdgeLine {
				source,
				target,
				label: edge.label.clone(),
			});
		}
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if dx.hypot(dy) < VERTEX_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Grabs the vertex under the pointer, or the background for panning.
	pub fn press(&mut self, sx: f64, sy: f64) {
		self.gesture = match self.node_at_position(sx, sy) {
			Some(node) => {
				let (gx, gy) = self.screen_to_graph(sx, sy);
				let (nx, ny) = self.positions().get(&node).copied().unwrap_or((gx, gy));
				Gesture::Drag {
					node,
					offset_x: nx - gx,
					offset_y: ny - gy,
				}
			}
			None => Gesture::Pan {
				start_x: sx,
				start_y: sy,
				origin_x: self.transform.x,
				origin_y: self.transform.y,
			},
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		match self.gesture {
			Gesture::Idle => {}
			Gesture::Drag {
				node,
				offset_x,
				offset_y,
			} => {
				let (gx, gy) = self.screen_to_graph(sx, sy);
				let (nx, ny) = ((gx + offset_x) as f32, (gy + offset_y) as f32);
				self.graph.visit_nodes_mut(|n| {
					if n.index() == node {
						n.data.x = nx;
						n.data.y = ny;
						n.data.is_anchor = true;
					}
				});
			}
			Gesture::Pan {
				start_x,
				start_y,
				origin_x,
				origin_y,
			} => {
				self.transform.x = origin_x + (sx - start_x);
				self.transform.y = origin_y + (sy - start_y);
			}
		}
	}

	/// Ends the gesture. A dragged vertex stays pinned where it was dropped.
	pub fn release(&mut self) {
		self.gesture = Gesture::Idle;
	}

	/// Zooms around the pointer.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = k;
	}

	pub fn is_highlighted(&self, id: &str) -> bool {
		self.highlight.contains(id)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}
