pub mod canvas;
pub mod graph;
pub mod term;

pub use canvas::Canvas;
pub use graph::Track;
