use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use web_sys::{Event, HtmlCanvasElement, MouseEvent};

use crate::components::export::download_png;
use crate::components::graph_canvas::GraphCanvas;
use crate::components::notice::{Notice, NoticeBanner, NoticeLevel, show_notice};
use crate::session::{GraphSession, SessionConfig, SessionEvent};
use crate::traversal::{BrowserTimer, EdgeMode, Graph, HighlightState, TraversalOrder, VisitRecord};

const EDGE_PLACEHOLDER: &str =
	"Enter Edges\nUnweighted -> (Source,Target) eg. 2 3\nWeighted -> (Source,Target,Weight) eg. 2 3 4";

/// Graph builder with BFS/DFS animation.
#[component]
pub fn Home() -> impl IntoView {
	let graph = RwSignal::new(Graph::new());
	let mode = RwSignal::new(EdgeMode::default());
	let highlight = RwSignal::new(HighlightState::default());
	let result = RwSignal::new(None::<VisitRecord>);
	let notice = RwSignal::new(None::<Notice>);
	let vertex_input = RwSignal::new(String::new());
	let edge_input = RwSignal::new(String::new());
	let bfs_start = RwSignal::new(String::new());
	let dfs_start = RwSignal::new(String::new());
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let session = Rc::new(RefCell::new(
		GraphSession::new(BrowserTimer, SessionConfig::default()).on_event(move |event| {
			match event {
				SessionEvent::Visited(id) => highlight.update(|h| h.mark(id)),
				SessionEvent::Completed(record) => result.set(Some(record.clone())),
				SessionEvent::Cleared => {
					highlight.update(HighlightState::clear);
					result.set(None);
				}
			}
		}),
	));

	let session_vertices = session.clone();
	let on_vertices = move |ev: Event| {
		let value = event_target_value(&ev);
		vertex_input.set(value.clone());
		let generated = session_vertices.borrow_mut().generate(&value);
		match generated {
			Ok(_) => graph.set(session_vertices.borrow().graph().clone()),
			Err(err) => show_notice(notice, NoticeLevel::Warning, "Invalid Input", err.to_string()),
		}
	};

	let session_edges = session.clone();
	let on_edges = move |ev: Event| {
		let value = event_target_value(&ev);
		edge_input.set(value.clone());
		session_edges.borrow_mut().set_edges(&value);
		graph.set(session_edges.borrow().graph().clone());
	};

	let session_mode = session.clone();
	let on_mode = move |ev: Event| {
		if let Some(selected) = EdgeMode::from_name(&event_target_value(&ev)) {
			session_mode.borrow_mut().set_mode(selected);
			mode.set(selected);
		}
	};

	let session_run = session.clone();
	let run = move |order: TraversalOrder, start: String| {
		let started = session_run.borrow_mut().start(order, &start);
		if let Err(err) = started {
			show_notice(notice, NoticeLevel::Error, "Invalid Node ID", err.to_string());
		}
	};
	let (run_bfs, run_dfs) = (run.clone(), run);

	let session_reset = session.clone();
	let reset = move || {
		session_reset.borrow_mut().reset();
		bfs_start.set(String::new());
		dfs_start.set(String::new());
		show_notice(
			notice,
			NoticeLevel::Info,
			"Graph Reset",
			"The graph has been reset.",
		);
	};
	let (reset_bfs, reset_dfs) = (reset.clone(), reset);

	let session_new = session;
	let on_new_graph = move |_: MouseEvent| {
		session_new.borrow_mut().new_graph();
		graph.set(Graph::new());
		for input in [vertex_input, edge_input, bfs_start, dfs_start] {
			input.set(String::new());
		}
		show_notice(
			notice,
			NoticeLevel::Info,
			"New Graph Created",
			"All previous data has been cleared.",
		);
	};

	let on_download = move |_: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		match download_png(&canvas, "graph.png") {
			Ok(()) => show_notice(
				notice,
				NoticeLevel::Success,
				"Download Successful",
				"Graph has been downloaded.",
			),
			Err(err) => {
				error!("png export failed: {err:?}");
				show_notice(
					notice,
					NoticeLevel::Error,
					"Download Failed",
					"The canvas could not be exported.",
				);
			}
		}
	};

	view! {
		<div class="split">
			<div class="nodes_input">
				<header class="title-card">
					<h1>"Graphify"</h1>
				</header>

				<input
					class="node_number"
					placeholder="Enter Number Of Vertices"
					prop:value=move || vertex_input.get()
					on:input=on_vertices
				/>
				<textarea
					class="edge_specification"
					placeholder=EDGE_PLACEHOLDER
					prop:value=move || edge_input.get()
					on:input=on_edges
				/>

				<div class="run-row">
					<input
						class="bfs_input"
						placeholder="Enter BFS Start Node"
						prop:value=move || bfs_start.get()
						on:input=move |ev| bfs_start.set(event_target_value(&ev))
					/>
					<button class="primary" on:click=move |_| run_bfs(TraversalOrder::Bfs, bfs_start.get_untracked())>
						"Start BFS"
					</button>
					<button class="danger" on:click=move |_| reset_bfs()>"Reset"</button>
				</div>

				<div class="run-row">
					<input
						class="dfs_input"
						placeholder="Enter DFS Start Node"
						prop:value=move || dfs_start.get()
						on:input=move |ev| dfs_start.set(event_target_value(&ev))
					/>
					<button class="primary" on:click=move |_| run_dfs(TraversalOrder::Dfs, dfs_start.get_untracked())>
						"Start DFS"
					</button>
					<button class="danger" on:click=move |_| reset_dfs()>"Reset"</button>
				</div>

				<section class="result">
					<h2>"Traversal Result:"</h2>
					<div class="result-box">
						{move || result.get().map(|record| record.to_string()).unwrap_or_default()}
					</div>
				</section>

				<NoticeBanner notice=notice />
			</div>

			<div class="cy-container">
				<div class="graph-specification">
					<select on:change=on_mode prop:value=move || mode.get().as_str()>
						<option value="undirected">"Undirected"</option>
						<option value="directed">"Directed"</option>
					</select>
					<button class="success" on:click=on_new_graph>"New Graph"</button>
				</div>
				<GraphCanvas
					graph=graph
					mode=mode
					highlight=highlight
					canvas_ref=canvas_ref
				/>
				<button class="primary" on:click=on_download>"Download Png"</button>
			</div>
		</div>
	}
}
