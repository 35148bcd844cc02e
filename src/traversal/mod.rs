//! Graph model, BFS/DFS traversal and timed replay.
//!
//! Nothing here touches the DOM except [`BrowserTimer`], which only runs
//! when a replay is started in the browser.

mod edge_list;
mod engine;
mod error;
mod graph;
mod highlight;
mod scheduler;

pub use edge_list::{EdgeListReport, parse_edge_list, parse_vertex_count};
pub use engine::{TraversalOrder, VisitRecord, traverse};
pub use error::{GraphError, InputError, TraversalError};
pub use graph::{Edge, EdgeMode, Graph, GraphStore, VertexId};
pub use highlight::HighlightState;
pub use scheduler::{
	BrowserTimer, DEFAULT_STEP_DELAY, ReplayConfig, ReplayHandle, ReplayPhase, StepScheduler, Task,
	Timer,
};

#[cfg(test)]
pub(crate) use scheduler::testing;
