pub mod handler;

pub use handler::{TextGenerator, AI};
