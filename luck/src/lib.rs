pub mod draw;
pub mod error;
pub mod handler;
pub mod presentation;
pub mod settings;
pub mod trial;

pub use handler::{LuckHandler, Outcome};
