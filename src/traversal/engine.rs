//! Breadth-first and depth-first traversal.
//!
//! Both orders share one loop and differ only in the frontier: a queue for
//! BFS, a stack for DFS. A vertex may sit in the frontier more than once; it
//! is visited the first time it is popped and discarded afterwards.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use log::debug;

use super::error::TraversalError;
use super::graph::{EdgeMode, GraphStore, VertexId};

/// Which frontier discipline to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
	/// First in, first out.
	Bfs,
	/// Last in, first out.
	Dfs,
}

impl TraversalOrder {
	/// Short display name.
	pub const fn label(self) -> &'static str {
		match self {
			Self::Bfs => "BFS",
			Self::Dfs => "DFS",
		}
	}
}

impl fmt::Display for TraversalOrder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Vertices in the order they were visited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitRecord(Vec<VertexId>);

impl VisitRecord {
	/// The `index`-th visited vertex.
	pub fn get(&self, index: usize) -> Option<&VertexId> {
		self.0.get(index)
	}

	/// Visited vertices, first visit first.
	pub fn iter(&self) -> impl Iterator<Item = &VertexId> {
		self.0.iter()
	}
}

/// Comma separated, as shown in the result box.
impl fmt::Display for VisitRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join(", "))
	}
}

enum Frontier {
	Queue(VecDeque<VertexId>),
	Stack(Vec<VertexId>),
}

impl Frontier {
	fn new(order: TraversalOrder, start: VertexId) -> Self {
		match order {
			TraversalOrder::Bfs => Self::Queue(VecDeque::from([start])),
			TraversalOrder::Dfs => Self::Stack(vec![start]),
		}
	}

	fn push(&mut self, id: VertexId) {
		match self {
			Self::Queue(queue) => queue.push_back(id),
			Self::Stack(stack) => stack.push(id),
		}
	}

	fn pop(&mut self) -> Option<VertexId> {
		match self {
			Self::Queue(queue) => queue.pop_front(),
			Self::Stack(stack) => stack.pop(),
		}
	}
}

/// Walks `graph` from `start` and returns the full visit order.
///
/// # Errors
///
/// [`TraversalError::UnknownStartVertex`] if `start` is not in the graph.
pub fn traverse<G: GraphStore + ?Sized>(
	graph: &G,
	start: &str,
	order: TraversalOrder,
	mode: EdgeMode,
) -> Result<VisitRecord, TraversalError> {
	if !graph.has_vertex(start) {
		return Err(TraversalError::UnknownStartVertex(start.to_string()));
	}

	let mut frontier = Frontier::new(order, start.to_string());
	let mut visited: HashSet<VertexId> = HashSet::new();
	let mut record = Vec::new();

	while let Some(current) = frontier.pop() {
		if visited.contains(&current) {
			continue;
		}
		visited.insert(current.clone());
		for neighbor in graph.outgoing_neighbors(&current, mode) {
			if !visited.contains(&neighbor) {
				frontier.push(neighbor);
			}
		}
		record.push(current);
	}

	debug!(
		"{order} from {start} ({}) visited {} vertices",
		mode.as_str(),
		record.len()
	);
	Ok(VisitRecord(record))
}
