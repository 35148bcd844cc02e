//! Property-based tests for the traversal engine using proptest.
//!
//! Properties verified, for both orders and both edge modes:
//! - The same input always yields the same record
//! - Every reachable vertex is visited exactly once, nothing else is
//! - BFS visits vertices in non-decreasing distance from the start
//! - Every vertex after the start is adjacent to an earlier one
//! - An unknown start vertex is an error

#![allow(unused_crate_dependencies)]

use std::collections::{HashMap, HashSet, VecDeque};

use graphify::traversal::{Edge, EdgeMode, Graph, TraversalError, TraversalOrder, traverse};
use proptest::prelude::*;

type Case = (usize, Vec<(usize, usize)>, usize);

/// Vertex count, edge pairs and a start index that may be out of range.
fn graph_case() -> impl Strategy<Value = Case> {
	(1usize..12).prop_flat_map(|n| {
		(
			Just(n),
			prop::collection::vec((0..n, 0..n), 0..30),
			0..n + 2,
		)
	})
}

fn order() -> impl Strategy<Value = TraversalOrder> {
	prop_oneof![Just(TraversalOrder::Bfs), Just(TraversalOrder::Dfs)]
}

fn mode() -> impl Strategy<Value = EdgeMode> {
	prop_oneof![Just(EdgeMode::Directed), Just(EdgeMode::Undirected)]
}

fn build(n: usize, edges: &[(usize, usize)]) -> Graph {
	let mut graph = Graph::with_vertex_count(n);
	for &(source, target) in edges {
		graph
			.add_edge(Edge::new(source.to_string(), target.to_string()))
			.unwrap();
	}
	graph
}

fn adjacent(edges: &[(usize, usize)], mode: EdgeMode, from: usize, to: usize) -> bool {
	edges.iter().any(|&(source, target)| {
		(source == from && target == to)
			|| (mode == EdgeMode::Undirected && source == to && target == from)
	})
}

/// Shortest hop count from `start` to every reachable vertex.
fn distances(edges: &[(usize, usize)], mode: EdgeMode, start: usize) -> HashMap<usize, usize> {
	let mut distance = HashMap::from([(start, 0)]);
	let mut queue = VecDeque::from([start]);
	while let Some(current) = queue.pop_front() {
		let d = distance[&current];
		for &(source, target) in edges {
			let next = match mode {
				_ if source == current => target,
				EdgeMode::Undirected if target == current => source,
				_ => continue,
			};
			if !distance.contains_key(&next) {
				distance.insert(next, d + 1);
				queue.push_back(next);
			}
		}
	}
	distance
}

fn visited(graph: &Graph, start: usize, order: TraversalOrder, mode: EdgeMode) -> Vec<usize> {
	traverse(graph, &start.to_string(), order, mode)
		.unwrap()
		.iter()
		.map(|id| id.parse().unwrap())
		.collect()
}

proptest! {
	/// Property: traversing twice gives identical records.
	#[test]
	fn prop_traversal_is_deterministic(
		(n, edges, start) in graph_case(),
		order in order(),
		mode in mode(),
	) {
		let graph = build(n, &edges);
		let id = start.to_string();
		prop_assert_eq!(
			traverse(&graph, &id, order, mode),
			traverse(&graph, &id, order, mode)
		);
	}

	/// Property: the record is exactly the reachable set, each vertex once.
	#[test]
	fn prop_visits_reachable_vertices_exactly_once(
		(n, edges, start) in graph_case(),
		order in order(),
		mode in mode(),
	) {
		prop_assume!(start < n);
		let graph = build(n, &edges);
		let record = visited(&graph, start, order, mode);

		let unique: HashSet<usize> = record.iter().copied().collect();
		prop_assert_eq!(unique.len(), record.len(), "duplicate visit in {:?}", record);

		let reachable: HashSet<usize> = distances(&edges, mode, start).into_keys().collect();
		prop_assert_eq!(unique, reachable);
		prop_assert_eq!(record.first(), Some(&start));
	}

	/// Property: BFS never visits a farther vertex before a nearer one.
	#[test]
	fn prop_bfs_distances_never_decrease(
		(n, edges, start) in graph_case(),
		mode in mode(),
	) {
		prop_assume!(start < n);
		let graph = build(n, &edges);
		let distance = distances(&edges, mode, start);
		let levels: Vec<usize> = visited(&graph, start, TraversalOrder::Bfs, mode)
			.iter()
			.map(|v| distance[v])
			.collect();
		prop_assert!(levels.windows(2).all(|w| w[0] <= w[1]), "levels {:?}", levels);
	}

	/// Property: each visit after the first follows an edge from a vertex
	/// visited earlier.
	#[test]
	fn prop_each_visit_extends_the_visited_region(
		(n, edges, start) in graph_case(),
		order in order(),
		mode in mode(),
	) {
		prop_assume!(start < n);
		let graph = build(n, &edges);
		let record = visited(&graph, start, order, mode);
		for (i, &vertex) in record.iter().enumerate().skip(1) {
			prop_assert!(
				record[..i].iter().any(|&earlier| adjacent(&edges, mode, earlier, vertex)),
				"{} in {:?} has no earlier neighbor", vertex, record
			);
		}
	}

	/// Property: a start id outside the graph is rejected.
	#[test]
	fn prop_unknown_start_is_an_error(
		(n, edges, _) in graph_case(),
		extra in 0usize..3,
		order in order(),
		mode in mode(),
	) {
		let graph = build(n, &edges);
		let id = (n + extra).to_string();
		prop_assert_eq!(
			traverse(&graph, &id, order, mode),
			Err(TraversalError::UnknownStartVertex(id.clone()))
		);
	}
}
