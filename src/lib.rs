//! Samyama Multigraph
//!
//! The adjacency-indexing and traversal core of a typed multigraph store.
//! A single in-memory structure holds nodes and edges under one of three
//! disciplines (directed, undirected or mixed) and supports parallel edges,
//! self-loops and uniquely keyed edges.
//!
//! # Architecture
//!
//! - [`GraphStore`] owns the edge records and is the only writer of the
//!   adjacency index.
//! - [`AdjacencyIndex`] keeps, for every node, three neighbor-keyed
//!   collections: incoming, outgoing and undirected edges.
//! - [`NeighborQuery`] and [`EdgeQuery`] read the index for one of the five
//!   [`Traversal`] variants. Neighbor results are deduplicated; edge results
//!   keep every parallel edge.
//!
//! Everything is single-threaded and synchronous. Lazy iterators borrow the
//! store, so mutating the graph while one is alive does not compile.
//!
//! ## Example Usage
//!
//! ```rust
//! use multigraph::{GraphOptions, GraphStore, Traversal};
//!
//! let mut graph = GraphStore::with_options(GraphOptions::default().with_multi(true));
//! graph.add_nodes_from(["John", "Martha", "Catherine"]).unwrap();
//!
//! graph.add_directed_edge_with_key("J->M", "John", "Martha").unwrap();
//! graph.add_directed_edge_with_key("C->J", "Catherine", "John").unwrap();
//! graph.add_undirected_edge_with_key("M<->J", "Martha", "John").unwrap();
//!
//! let edges = graph.edges(Traversal::Mixed).by_node("John").unwrap();
//! assert_eq!(edges, vec!["C->J", "J->M", "M<->J"]);
//!
//! let neighbors = graph.neighbors(Traversal::Mixed).by_node("John").unwrap();
//! assert_eq!(neighbors, vec!["Catherine", "Martha"]);
//!
//! assert!(graph.neighbors(Traversal::Out).by_pair("John", "Martha").unwrap());
//! ```

#![warn(clippy::all)]

pub mod graph;

// Re-export main types for convenience
pub use graph::{
    compatible, Adjacency, AdjacencyIndex, Direction, Edge, EdgeIter, EdgeKey, EdgeQuery,
    GraphError, GraphOptions, GraphResult, GraphStore, GraphType, NeighborIter, NeighborOutput,
    NeighborQuery, NodeEntry, NodeKey, QueryArg, Traversal,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
