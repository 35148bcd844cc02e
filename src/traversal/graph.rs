//! Graph store: vertices, weighted edges and adjacency queries.

use std::collections::HashSet;

use super::error::GraphError;

/// Vertex identifier, unique within one graph.
pub type VertexId = String;

/// Whether edges are followed only from source to target or both ways.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeMode {
	/// Follow an edge only from its source.
	Directed,
	/// Follow an edge from either endpoint. Arrowheads are hidden.
	#[default]
	Undirected,
}

impl EdgeMode {
	/// Stable name used by the mode selector.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Directed => "directed",
			Self::Undirected => "undirected",
		}
	}

	/// Inverse of [`EdgeMode::as_str`].
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"directed" => Some(Self::Directed),
			"undirected" => Some(Self::Undirected),
			_ => None,
		}
	}
}

/// A directed edge with an optional displayed weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Source vertex.
	pub source: VertexId,
	/// Target vertex.
	pub target: VertexId,
	/// Edge weight, 1 unless a numeric weight was given.
	pub weight: f64,
	/// Weight token exactly as typed, drawn next to the edge.
	pub label: Option<String>,
}

impl Edge {
	/// Unweighted edge (weight 1, label hidden).
	pub fn new(source: impl Into<VertexId>, target: impl Into<VertexId>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			weight: 1.0,
			label: None,
		}
	}

	/// Edge with an explicit weight token. The token is kept verbatim as the
	/// label; the numeric weight falls back to 1 when it is not a finite number.
	pub fn weighted(
		source: impl Into<VertexId>,
		target: impl Into<VertexId>,
		token: &str,
	) -> Self {
		Self {
			weight: token
				.parse::<f64>()
				.ok()
				.filter(|w| w.is_finite())
				.unwrap_or(1.0),
			label: Some(token.to_string()),
			..Self::new(source, target)
		}
	}

	/// Whether a weight was given and should be drawn.
	pub fn show_weight(&self) -> bool {
		self.label.is_some()
	}
}

/// Read-only view the traversal engine walks.
pub trait GraphStore {
	/// Whether `id` names a vertex.
	fn has_vertex(&self, id: &str) -> bool;

	/// Neighbors of `id` in edge-insertion order.
	///
	/// In [`EdgeMode::Undirected`] both incoming and outgoing edges count.
	fn outgoing_neighbors(&self, id: &str, mode: EdgeMode) -> Vec<VertexId>;
}

/// In-memory graph keeping vertices and edges in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	vertices: Vec<VertexId>,
	index: HashSet<VertexId>,
	edges: Vec<Edge>,
}

impl Graph {
	/// Empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// Graph with vertices `"0"` through `"n-1"` and no edges.
	pub fn with_vertex_count(n: usize) -> Self {
		let vertices: Vec<VertexId> = (0..n).map(|i| i.to_string()).collect();
		Self {
			index: vertices.iter().cloned().collect(),
			vertices,
			edges: Vec::new(),
		}
	}

	/// Adds an edge whose endpoints must both exist.
	pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
		if !self.has_vertex(&edge.source) || !self.has_vertex(&edge.target) {
			return Err(GraphError::DanglingEdge {
				from: edge.source,
				to: edge.target,
			});
		}
		self.edges.push(edge);
		Ok(())
	}

	/// Drops every edge, keeping the vertices.
	pub fn clear_edges(&mut self) {
		self.edges.clear();
	}

	/// Vertices in insertion order.
	pub fn vertices(&self) -> &[VertexId] {
		&self.vertices
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Number of vertices.
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	/// Number of edges.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	/// True when there are no vertices.
	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty()
	}
}

impl GraphStore for Graph {
	fn has_vertex(&self, id: &str) -> bool {
		self.index.contains(id)
	}

	fn outgoing_neighbors(&self, id: &str, mode: EdgeMode) -> Vec<VertexId> {
		self.edges
			.iter()
			.filter_map(|edge| match mode {
				_ if edge.source == id => Some(edge.target.clone()),
				EdgeMode::Undirected if edge.target == id => Some(edge.source.clone()),
				_ => None,
			})
			.collect()
	}
}
