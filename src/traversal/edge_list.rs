//! Parsers for the vertex-count field and the edge-list text area.
//!
//! Edge lines take one of two shapes, tokens separated by whitespace:
//!
//! ```text
//! 2 3      unweighted, weight 1
//! 2 3 4    weighted, weight 4 shown on the canvas
//! 2 3 far  labelled "far", weight 1
//! ```
//!
//! The third token is drawn exactly as typed. Any other token count is
//! dropped without an error. The line numbers of dropped
//! lines are kept in the report for logging.

use super::error::InputError;
use super::graph::Edge;

/// Result of parsing an edge list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeListReport {
	/// Well-formed edges in line order.
	pub edges: Vec<Edge>,
	/// One-based numbers of non-blank lines that were dropped.
	pub skipped: Vec<usize>,
}

/// Parses one edge per line.
pub fn parse_edge_list(text: &str) -> EdgeListReport {
	let mut report = EdgeListReport::default();
	for (number, line) in text.lines().enumerate() {
		if line.trim().is_empty() {
			continue;
		}
		match parse_edge_line(line) {
			Some(edge) => report.edges.push(edge),
			None => report.skipped.push(number + 1),
		}
	}
	report
}

fn parse_edge_line(line: &str) -> Option<Edge> {
	let tokens: Vec<&str> = line.split_whitespace().collect();
	match tokens.as_slice() {
		[source, target] => Some(Edge::new(*source, *target)),
		[source, target, weight] => Some(Edge::weighted(*source, *target, weight)),
		_ => None,
	}
}

/// Parses the vertex-count field. Blank input means an empty graph.
pub fn parse_vertex_count(input: &str, max: usize) -> Result<usize, InputError> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		return Ok(0);
	}
	let count = trimmed
		.parse::<usize>()
		.ok()
		.filter(|&n| n > 0)
		.ok_or_else(|| InputError::InvalidVertexCount(input.to_string()))?;
	if count > max {
		return Err(InputError::TooManyVertices {
			requested: count,
			max,
		});
	}
	Ok(count)
}
