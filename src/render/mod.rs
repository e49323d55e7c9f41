pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, Cell};
pub use renderer::Renderer;
