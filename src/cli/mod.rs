pub mod commands;
pub mod ui;

pub use commands::generate::{GenerateOptions, GenerateReport};
pub use ui::Output;
