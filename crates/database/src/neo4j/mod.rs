pub mod config;
pub mod store;
mod wire;

pub use config::Neo4jConfig;
pub use store::Neo4jHttpStore;
