pub mod common;
pub mod engine;
pub mod preprocess;
pub mod report;
pub mod resources;
