pub mod documents;
pub mod filesystem;
pub mod graph;
pub mod initialize;
pub mod process;
pub mod weather;
