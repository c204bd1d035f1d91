pub mod renderer;

pub use renderer::{JsonlRenderer, TraceRenderer};
