//! Neighbor queries
//!
//! A node's neighbor set is the union of the neighbor keys of the
//! collections its traversal reads: `in`, then `out`, then `undirected`.
//! Parallel edges collapse into one neighbor, and a neighbor reachable
//! through several collections is reported once, at its first occurrence.
//! Inside one collection, neighbors are ordered by their oldest surviving
//! edge.

use super::{bunch_position, compatible, QueryArg, Stage, Traversal};
use crate::graph::error::{GraphError, GraphResult};
use crate::graph::node::{Neighbors, NodeEntry};
use crate::graph::store::GraphStore;
use crate::graph::types::NodeKey;
use tracing::trace;

/// Result of a dynamically dispatched neighbor query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeighborOutput {
    /// One node: its neighbors
    Neighbors(Vec<NodeKey>),
    /// Two nodes: whether the second is a neighbor of the first
    Adjacent(bool),
}

/// Neighbor queries of one traversal variant over a graph
#[derive(Debug, Clone, Copy)]
pub struct NeighborQuery<'g> {
    store: &'g GraphStore,
    traversal: Traversal,
}

impl<'g> NeighborQuery<'g> {
    pub(crate) fn new(store: &'g GraphStore, traversal: Traversal) -> Self {
        Self { store, traversal }
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// The node's neighbors, in walk order
    pub fn by_node(&self, node: impl Into<NodeKey>) -> GraphResult<Vec<NodeKey>> {
        Ok(self.iter_by_node(node)?.cloned().collect())
    }

    /// Whether `neighbor` belongs to the neighbor set of `node`
    pub fn by_pair(
        &self,
        node: impl Into<NodeKey>,
        neighbor: impl Into<NodeKey>,
    ) -> GraphResult<bool> {
        if !self.is_compatible() {
            return Ok(false);
        }

        let node = node.into();
        let neighbor = neighbor.into();
        let entry = self.entry(&node)?;
        self.entry(&neighbor)?;

        let traversal = self.traversal;
        Ok((traversal.includes_in() && entry.inbound.has_neighbor(&neighbor))
            || (traversal.includes_out() && entry.outbound.has_neighbor(&neighbor))
            || (traversal.includes_undirected() && entry.undirected.has_neighbor(&neighbor)))
    }

    /// Lazy view of the node's neighbors.
    ///
    /// The iterator borrows the graph, so it cannot outlive a mutation.
    /// Each call starts a fresh walk.
    pub fn iter_by_node(&self, node: impl Into<NodeKey>) -> GraphResult<NeighborIter<'g>> {
        if !self.is_compatible() {
            return Ok(NeighborIter::empty(self.traversal));
        }
        let node = node.into();
        let entry = self.entry(&node)?;
        Ok(NeighborIter::new(entry, self.traversal))
    }

    /// Number of distinct neighbors
    pub fn count(&self, node: impl Into<NodeKey>) -> GraphResult<usize> {
        Ok(self.iter_by_node(node)?.count())
    }

    /// Dispatch on positional arguments: one node lists its neighbors, two
    /// nodes test adjacency. Bunches are not accepted.
    pub fn call(&self, args: &[QueryArg]) -> GraphResult<NeighborOutput> {
        match args {
            [QueryArg::Node(node)] => self.by_node(node).map(NeighborOutput::Neighbors),
            [QueryArg::Node(node), QueryArg::Node(neighbor)] => {
                self.by_pair(node, neighbor).map(NeighborOutput::Adjacent)
            }
            [_] | [_, _] => Err(GraphError::BunchNotAccepted {
                operation: self.traversal.neighbors_operation(),
                position: bunch_position(args),
            }),
            _ => Err(GraphError::InvalidArguments {
                operation: self.traversal.neighbors_operation(),
                expected: "1 or 2 nodes",
                received: args.len(),
            }),
        }
    }

    fn is_compatible(&self) -> bool {
        let discipline = self.store.graph_type();
        let ok = compatible(self.traversal.declared_type(), discipline);
        if !ok {
            trace!(
                "{} on a {} graph: nothing to traverse",
                self.traversal.neighbors_operation(),
                discipline
            );
        }
        ok
    }

    fn entry(&self, node: &NodeKey) -> GraphResult<&'g NodeEntry> {
        self.store
            .entry(node)
            .ok_or_else(|| GraphError::not_found(self.traversal.neighbors_operation(), node))
    }
}

/// Lazy, finite walk over a node's neighbors
///
/// Deduplication needs no auxiliary set: a key met in a later collection
/// is skipped when an earlier collection of the same walk already holds it.
#[derive(Debug, Clone)]
pub struct NeighborIter<'g> {
    entry: Option<&'g NodeEntry>,
    traversal: Traversal,
    stage: Stage,
    keys: Option<Neighbors<'g>>,
}

impl<'g> NeighborIter<'g> {
    fn new(entry: &'g NodeEntry, traversal: Traversal) -> Self {
        Self {
            entry: Some(entry),
            traversal,
            stage: Stage::Start,
            keys: None,
        }
    }

    fn empty(traversal: Traversal) -> Self {
        Self {
            entry: None,
            traversal,
            stage: Stage::Done,
            keys: None,
        }
    }
}

fn seen_earlier(entry: &NodeEntry, traversal: Traversal, stage: Stage, key: &NodeKey) -> bool {
    let in_inbound = || traversal.includes_in() && entry.inbound.has_neighbor(key);
    let in_outbound = || traversal.includes_out() && entry.outbound.has_neighbor(key);
    match stage {
        Stage::Out => in_inbound(),
        Stage::Undirected => in_inbound() || in_outbound(),
        _ => false,
    }
}

impl<'g> Iterator for NeighborIter<'g> {
    type Item = &'g NodeKey;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entry?;
        loop {
            if let Some(keys) = self.keys.as_mut() {
                let (traversal, stage) = (self.traversal, self.stage);
                let found = keys.find(|key| !seen_earlier(entry, traversal, stage, key));
                if found.is_some() {
                    return found;
                }
            }

            self.stage = self.stage.next(self.traversal);
            match self.stage.collection(entry) {
                Some(adjacency) => self.keys = Some(adjacency.neighbors()),
                None => {
                    self.keys = None;
                    return None;
                }
            }
        }
    }
}
