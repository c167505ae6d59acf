//! Typed multigraph core
//!
//! This module implements:
//! - Directed, undirected and mixed graph disciplines
//! - Parallel edges, self-loops and uniquely keyed edges
//! - A per-node adjacency index (`in` / `out` / `undirected`) kept in step
//!   with every edge insertion and removal
//! - Neighbor and edge queries over that index, eager and lazy

pub mod adjacency;
pub mod edge;
pub mod error;
mod linked;
pub mod node;
pub mod options;
pub mod query;
pub mod store;
pub mod types;

// Re-export main types
pub use adjacency::AdjacencyIndex;
pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use node::{Adjacency, NodeEntry};
pub use options::GraphOptions;
pub use query::{
    compatible, Direction, EdgeIter, EdgeQuery, NeighborIter, NeighborOutput, NeighborQuery,
    QueryArg, Traversal,
};
pub use store::GraphStore;
pub use types::{EdgeKey, GraphType, NodeKey};
