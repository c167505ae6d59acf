//! Neighbor and edge query engines
//!
//! Every query is parameterized by a [`Traversal`], the closed set of five
//! variants (`neighbors`/`edges`, `in_*`, `out_*`, `directed_*`,
//! `undirected_*`). A traversal carries a declared type and a direction.
//! When the declared type conflicts with the graph discipline the query
//! ends before touching the adjacency index, with an empty result.
//!
//! The call shapes are explicit methods (`all`, `by_node`, `by_bunch`,
//! `by_pair`). [`NeighborQuery::call`] and [`EdgeQuery::call`] accept a
//! positional argument list instead, for callers that receive arguments
//! dynamically, and report unsupported arities as
//! [`GraphError::InvalidArguments`](super::GraphError::InvalidArguments)
//! and a bunch in an unsupported position as
//! [`GraphError::BunchNotAccepted`](super::GraphError::BunchNotAccepted).

mod edges;
mod neighbors;

pub use edges::{EdgeIter, EdgeQuery};
pub use neighbors::{NeighborIter, NeighborOutput, NeighborQuery};

use super::node::{Adjacency, NodeEntry};
use super::types::{GraphType, NodeKey};
use std::fmt;

/// Direction declared by a query variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    In,
    Out,
    Both,
}

/// The five query variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Every kind of edge, both directions
    Mixed,
    /// Incoming directed edges
    In,
    /// Outgoing directed edges
    Out,
    /// Directed edges, both directions
    Directed,
    /// Undirected edges
    Undirected,
}

impl Traversal {
    pub const ALL: [Traversal; 5] = [
        Traversal::Mixed,
        Traversal::In,
        Traversal::Out,
        Traversal::Directed,
        Traversal::Undirected,
    ];

    pub fn declared_type(self) -> GraphType {
        match self {
            Traversal::Mixed => GraphType::Mixed,
            Traversal::In | Traversal::Out | Traversal::Directed => GraphType::Directed,
            Traversal::Undirected => GraphType::Undirected,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Traversal::In => Direction::In,
            Traversal::Out => Direction::Out,
            _ => Direction::Both,
        }
    }

    pub fn neighbors_operation(self) -> &'static str {
        match self {
            Traversal::Mixed => "neighbors",
            Traversal::In => "in_neighbors",
            Traversal::Out => "out_neighbors",
            Traversal::Directed => "directed_neighbors",
            Traversal::Undirected => "undirected_neighbors",
        }
    }

    pub fn edges_operation(self) -> &'static str {
        match self {
            Traversal::Mixed => "edges",
            Traversal::In => "in_edges",
            Traversal::Out => "out_edges",
            Traversal::Directed => "directed_edges",
            Traversal::Undirected => "undirected_edges",
        }
    }

    /// Whether edges of the given directedness match this variant
    pub fn admits(self, directed: bool) -> bool {
        self.declared_type().accepts(directed)
    }

    pub(crate) fn includes_in(self) -> bool {
        self.declared_type() != GraphType::Undirected && self.direction() != Direction::Out
    }

    pub(crate) fn includes_out(self) -> bool {
        self.declared_type() != GraphType::Undirected && self.direction() != Direction::In
    }

    pub(crate) fn includes_undirected(self) -> bool {
        self.declared_type() != GraphType::Directed
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.edges_operation())
    }
}

/// Whether a query declared as `declared` can match anything in a graph
/// of the given discipline.
pub fn compatible(declared: GraphType, discipline: GraphType) -> bool {
    declared == GraphType::Mixed || discipline == GraphType::Mixed || declared == discipline
}

/// A positional query argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryArg {
    Node(NodeKey),
    /// A collection of nodes whose per-node results are unioned
    Bunch(Vec<NodeKey>),
}

impl QueryArg {
    pub fn node(key: impl Into<NodeKey>) -> Self {
        QueryArg::Node(key.into())
    }

    pub fn bunch<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        QueryArg::Bunch(keys.into_iter().map(Into::into).collect())
    }
}

impl From<NodeKey> for QueryArg {
    fn from(key: NodeKey) -> Self {
        QueryArg::Node(key)
    }
}

impl From<&str> for QueryArg {
    fn from(key: &str) -> Self {
        QueryArg::Node(key.into())
    }
}

impl From<Vec<NodeKey>> for QueryArg {
    fn from(keys: Vec<NodeKey>) -> Self {
        QueryArg::Bunch(keys)
    }
}

/// 1-based position of the first bunch in `args`, 0 if there is none
pub(crate) fn bunch_position(args: &[QueryArg]) -> usize {
    args.iter()
        .position(|arg| matches!(arg, QueryArg::Bunch(_)))
        .map_or(0, |i| i + 1)
}

/// Position of a per-node walk over the three adjacency collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Start,
    In,
    Out,
    Undirected,
    Done,
}

impl Stage {
    /// The next collection `traversal` reads, skipping excluded ones
    pub(crate) fn next(self, traversal: Traversal) -> Stage {
        let mut stage = self;
        loop {
            stage = match stage {
                Stage::Start => Stage::In,
                Stage::In => Stage::Out,
                Stage::Out => Stage::Undirected,
                Stage::Undirected | Stage::Done => return Stage::Done,
            };
            let included = match stage {
                Stage::In => traversal.includes_in(),
                Stage::Out => traversal.includes_out(),
                Stage::Undirected => traversal.includes_undirected(),
                Stage::Start | Stage::Done => false,
            };
            if included {
                return stage;
            }
        }
    }

    pub(crate) fn collection(self, entry: &NodeEntry) -> Option<&Adjacency> {
        match self {
            Stage::In => Some(&entry.inbound),
            Stage::Out => Some(&entry.outbound),
            Stage::Undirected => Some(&entry.undirected),
            Stage::Start | Stage::Done => None,
        }
    }
}
