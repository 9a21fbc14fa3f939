pub mod app;
pub mod env;
pub mod error;
pub mod generators;
pub mod maze;

pub use error::{AppError, MazeError, Result};
