pub mod export;
pub mod graph_canvas;
pub mod notice;
