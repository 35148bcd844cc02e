//! Which vertices the canvas draws as visited.

use std::collections::HashSet;

use super::graph::VertexId;

/// Vertices currently drawn as visited.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightState {
	visited: HashSet<VertexId>,
}

impl HighlightState {
	/// Marks `id` as visited.
	pub fn mark(&mut self, id: &str) {
		self.visited.insert(id.to_string());
	}

	/// Forgets every mark.
	pub fn clear(&mut self) {
		self.visited.clear();
	}

	/// Whether `id` is drawn as visited.
	pub fn contains(&self, id: &str) -> bool {
		self.visited.contains(id)
	}

	/// True when nothing is highlighted.
	pub fn is_empty(&self) -> bool {
		self.visited.is_empty()
	}
}
