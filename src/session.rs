//! The state behind one graph page: current graph, edge mode, highlight
//! state, last result and the replay in flight.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::traversal::{
	EdgeListReport, EdgeMode, Graph, HighlightState, InputError, ReplayConfig, ReplayHandle,
	StepScheduler, Timer, TraversalError, TraversalOrder, VertexId, VisitRecord, parse_edge_list,
	parse_vertex_count, traverse,
};

/// Largest vertex count the page accepts.
pub const DEFAULT_MAX_VERTICES: usize = 200;

/// Replay pacing and input limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
	/// Delay between replay steps.
	pub replay: ReplayConfig,
	/// Largest count [`GraphSession::generate`] accepts.
	pub max_vertices: usize,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			replay: ReplayConfig::default(),
			max_vertices: DEFAULT_MAX_VERTICES,
		}
	}
}

/// What the page needs to redraw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
	/// A replay highlighted this vertex.
	Visited(VertexId),
	/// A replay delivered its last vertex.
	Completed(VisitRecord),
	/// Highlights and result were cleared.
	Cleared,
}

type Observer = Rc<dyn Fn(&SessionEvent)>;

/// One graph and the traversal animation running over it. At most one
/// replay is in flight; every new run or reset cancels the previous one.
pub struct GraphSession<T> {
	config: SessionConfig,
	graph: Graph,
	mode: EdgeMode,
	edge_text: String,
	highlight: Rc<RefCell<HighlightState>>,
	result: Rc<RefCell<Option<VisitRecord>>>,
	scheduler: StepScheduler<T>,
	observer: Observer,
}

impl<T: Timer + 'static> GraphSession<T> {
	/// Empty session replaying through `timer`.
	pub fn new(timer: T, config: SessionConfig) -> Self {
		Self {
			config,
			graph: Graph::new(),
			mode: EdgeMode::default(),
			edge_text: String::new(),
			highlight: Rc::default(),
			result: Rc::default(),
			scheduler: StepScheduler::new(timer, config.replay),
			observer: Rc::new(|_: &SessionEvent| {}),
		}
	}

	/// Registers the callback that receives every [`SessionEvent`].
	pub fn on_event(mut self, observer: impl Fn(&SessionEvent) + 'static) -> Self {
		self.observer = Rc::new(observer);
		self
	}

	/// Current graph.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// Current edge mode.
	pub fn mode(&self) -> EdgeMode {
		self.mode
	}

	/// Snapshot of the vertices highlighted so far.
	pub fn highlight(&self) -> HighlightState {
		self.highlight.borrow().clone()
	}

	/// Record of the last replay that ran to completion.
	pub fn result(&self) -> Option<VisitRecord> {
		self.result.borrow().clone()
	}

	/// Whether a replay is still stepping.
	pub fn is_animating(&self) -> bool {
		self.scheduler.is_active()
	}

	/// Rebuilds the graph with `"0".."n-1"` from the vertex-count field and
	/// re-applies the current edge text. Invalid input leaves the graph as is.
	pub fn generate(&mut self, input: &str) -> Result<usize, InputError> {
		let count = parse_vertex_count(input, self.config.max_vertices).inspect_err(|err| {
			warn!("rejected vertex count: {err}");
		})?;
		self.stop();
		self.graph = Graph::with_vertex_count(count);
		self.apply_edges();
		info!(
			"generated graph with {} vertices and {} edges",
			self.graph.vertex_count(),
			self.graph.edge_count()
		);
		Ok(count)
	}

	/// Replaces the edge list. Malformed lines and edges to missing vertices
	/// are skipped.
	pub fn set_edges(&mut self, text: &str) -> EdgeListReport {
		text.clone_into(&mut self.edge_text);
		self.stop();
		self.apply_edges()
	}

	/// Switches edge mode. A running replay keeps going.
	pub fn set_mode(&mut self, mode: EdgeMode) {
		if self.mode != mode {
			debug!("edge mode set to {}", mode.as_str());
			self.mode = mode;
		}
	}

	/// Computes the traversal and starts replaying it, replacing any replay in
	/// flight.
	///
	/// # Errors
	///
	/// [`TraversalError::UnknownStartVertex`] leaves the session untouched.
	pub fn start(
		&mut self,
		order: TraversalOrder,
		start: &str,
	) -> Result<ReplayHandle, TraversalError> {
		let record = traverse(&self.graph, start.trim(), order, self.mode).inspect_err(|err| {
			warn!("{order} not started: {err}");
		})?;
		self.stop();
		info!("{order} started from {}", start.trim());

		let (highlight, observer) = (self.highlight.clone(), self.observer.clone());
		let on_visit = move |id: &str| {
			highlight.borrow_mut().mark(id);
			observer(&SessionEvent::Visited(id.to_string()));
		};

		let (result, observer) = (self.result.clone(), self.observer.clone());
		let on_complete = move |record: VisitRecord| {
			info!("{order} finished: {record}");
			*result.borrow_mut() = Some(record.clone());
			observer(&SessionEvent::Completed(record));
		};

		Ok(self.scheduler.start(record, on_visit, on_complete))
	}

	/// Cancels the replay and clears highlights and result.
	pub fn reset(&mut self) {
		self.stop();
		info!("graph reset");
	}

	/// Drops every vertex and edge as well.
	pub fn new_graph(&mut self) {
		self.stop();
		self.graph = Graph::new();
		self.edge_text.clear();
		info!("new graph");
	}

	fn stop(&mut self) {
		self.scheduler.cancel();
		self.highlight.borrow_mut().clear();
		*self.result.borrow_mut() = None;
		(self.observer)(&SessionEvent::Cleared);
	}

	fn apply_edges(&mut self) -> EdgeListReport {
		self.graph.clear_edges();
		let report = parse_edge_list(&self.edge_text);
		if !report.skipped.is_empty() {
			debug!("ignored malformed edge lines {:?}", report.skipped);
		}
		for edge in &report.edges {
			if let Err(err) = self.graph.add_edge(edge.clone()) {
				warn!("{err}");
			}
		}
		report
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;
	use crate::traversal::testing::ManualTimer;
	use crate::traversal::{Edge, ReplayPhase};

	fn session() -> (GraphSession<ManualTimer>, ManualTimer, Rc<RefCell<Vec<SessionEvent>>>) {
		let timer = ManualTimer::default();
		let events: Rc<RefCell<Vec<SessionEvent>>> = Rc::default();
		let sink = events.clone();
		let mut session = GraphSession::new(timer.clone(), SessionConfig::default())
			.on_event(move |event| sink.borrow_mut().push(event.clone()));
		session.set_edges("0 1\n1 2\n0 3");
		session.generate("4").unwrap();
		events.borrow_mut().clear();
		(session, timer, events)
	}

	fn highlighted(session: &GraphSession<ManualTimer>) -> Vec<&str> {
		let state = session.highlight();
		let mut ids: Vec<&str> = session
			.graph()
			.vertices()
			.iter()
			.map(String::as_str)
			.filter(|id| state.contains(id))
			.collect();
		ids.sort_unstable();
		ids
	}

	#[test]
	fn generate_applies_pending_edges() {
		let (session, _, _) = session();
		assert_eq!(session.graph().vertex_count(), 4);
		assert_eq!(session.graph().edges()[2], Edge::new("0", "3"));
	}

	#[test]
	fn invalid_vertex_count_keeps_the_graph() {
		let (mut session, _, events) = session();
		assert!(session.generate("many").is_err());
		assert_eq!(session.graph().vertex_count(), 4);
		assert!(events.borrow().is_empty());
	}

	#[test]
	fn edges_to_missing_vertices_are_skipped() {
		let (mut session, _, _) = session();
		let report = session.set_edges("0 1\n2 9\nbad line here too\n1 2 far");
		assert_eq!(report.edges.len(), 3);
		assert_eq!(report.skipped, vec![3]);
		assert_eq!(
			session.graph().edges(),
			[Edge::new("0", "1"), Edge::weighted("1", "2", "far")]
		);
	}

	#[test]
	fn replay_highlights_then_publishes_result() {
		let (mut session, timer, events) = session();
		session.set_mode(EdgeMode::Directed);
		session.start(TraversalOrder::Bfs, "0").unwrap();
		assert!(session.is_animating());

		timer.fire(2);
		assert_eq!(highlighted(&session), ["0", "1"]);
		assert_eq!(session.result(), None);

		timer.run_until_idle();
		let result = session.result().unwrap();
		assert_eq!(result.to_string(), "0, 1, 3, 2");
		assert!(!session.is_animating());
		assert_eq!(
			*events.borrow(),
			[
				SessionEvent::Cleared,
				SessionEvent::Visited("0".into()),
				SessionEvent::Visited("1".into()),
				SessionEvent::Visited("3".into()),
				SessionEvent::Visited("2".into()),
				SessionEvent::Completed(result),
			]
		);
	}

	#[test]
	fn unknown_start_vertex_mutates_nothing() {
		let (mut session, timer, events) = session();
		session.start(TraversalOrder::Dfs, "0").unwrap();
		timer.fire(1);
		let before = session.highlight();

		let err = session.start(TraversalOrder::Bfs, "42").unwrap_err();
		assert_eq!(err, TraversalError::UnknownStartVertex("42".into()));
		assert_eq!(session.highlight(), before);
		assert!(session.is_animating());
		assert_eq!(events.borrow().len(), 2);
	}

	#[test]
	fn restart_never_mixes_highlights_of_two_runs() {
		let (mut session, timer, _) = session();
		session.set_mode(EdgeMode::Directed);
		let first = session.start(TraversalOrder::Dfs, "0").unwrap();
		timer.fire(3);
		assert_eq!(highlighted(&session), ["0", "1", "3"]);

		let second = session.start(TraversalOrder::Bfs, "1").unwrap();
		assert_eq!(first.phase(), ReplayPhase::Cancelled);
		assert!(session.highlight().is_empty());

		// The first run's pending step fires as a no-op.
		timer.fire(2);
		assert_eq!(highlighted(&session), ["1"]);
		timer.run_until_idle();
		assert_eq!(highlighted(&session), ["1", "2"]);
		assert_eq!(second.phase(), ReplayPhase::Completed);
		assert_eq!(session.result().unwrap().to_string(), "1, 2");
	}

	#[test]
	fn undirected_mode_reaches_edge_sources() {
		let (mut session, timer, _) = session();
		session.set_mode(EdgeMode::Undirected);
		session.start(TraversalOrder::Bfs, "2").unwrap();
		timer.run_until_idle();
		assert_eq!(session.result().unwrap().to_string(), "2, 1, 0, 3");
	}

	#[test]
	fn reset_stops_the_replay_and_clears_state() {
		let (mut session, timer, events) = session();
		let handle = session.start(TraversalOrder::Bfs, "0").unwrap();
		timer.fire(2);
		session.reset();

		assert_eq!(handle.phase(), ReplayPhase::Cancelled);
		assert!(session.highlight().is_empty());
		timer.run_until_idle();
		assert!(session.highlight().is_empty());
		assert_eq!(session.result(), None);
		assert_eq!(events.borrow().last(), Some(&SessionEvent::Cleared));
		assert_eq!(session.graph().vertex_count(), 4);
	}

	#[test]
	fn new_graph_forgets_vertices_and_edges() {
		let (mut session, _, _) = session();
		session.new_graph();
		assert!(session.graph().is_empty());
		session.generate("3").unwrap();
		assert_eq!(session.graph().edge_count(), 0);
	}

	#[test]
	fn replay_uses_configured_delay() {
		let timer = ManualTimer::default();
		let config = SessionConfig {
			replay: ReplayConfig {
				step_delay: Duration::from_millis(40),
			},
			..SessionConfig::default()
		};
		let mut session = GraphSession::new(timer.clone(), config);
		session.generate("2").unwrap();
		session.start(TraversalOrder::Bfs, "1").unwrap();
		timer.fire(1);
		assert_eq!(timer.delays(), [Duration::from_millis(40)]);
	}
}
