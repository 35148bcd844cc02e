//! Error types for graph construction and traversal.

use thiserror::Error;

/// Traversal precondition failures.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TraversalError {
	/// The requested start vertex is not part of the graph.
	#[error("Node with ID {0} does not exist.")]
	UnknownStartVertex(String),
}

/// Rejected graph mutations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// An edge endpoint does not name an existing vertex.
	#[error("edge {from} -> {to} references a missing vertex")]
	DanglingEdge {
		/// Declared source id.
		from: String,
		/// Declared target id.
		to: String,
	},
}

/// Invalid vertex-count input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InputError {
	/// Not a positive integer.
	#[error("Please enter a valid number of nodes, got {0:?}.")]
	InvalidVertexCount(String),

	/// Above the configured vertex limit.
	#[error("At most {max} nodes are supported, got {requested}.")]
	TooManyVertices {
		/// Parsed count.
		requested: usize,
		/// Configured limit.
		max: usize,
	},
}
