pub mod gesture;
pub mod handler;

pub use gesture::GestureInterpreter;
pub use handler::{InputAction, InputHandler};
