//! Shared fixtures for the integration tests

#![allow(dead_code)]

use multigraph::{GraphOptions, GraphStore};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Mixed multigraph with three directed and four undirected edges, plus
/// two isolated nodes.
pub fn social_graph() -> GraphStore {
    init_tracing();

    let mut graph = GraphStore::with_options(GraphOptions::default().with_multi(true));
    graph
        .add_nodes_from([
            "John",
            "Thomas",
            "Martha",
            "Roger",
            "Catherine",
            "Alone",
            "Forever",
        ])
        .unwrap();

    graph.add_directed_edge_with_key("J->T", "John", "Thomas").unwrap();
    graph.add_directed_edge_with_key("J->M", "John", "Martha").unwrap();
    graph.add_directed_edge_with_key("C->J", "Catherine", "John").unwrap();

    graph.add_undirected_edge_with_key("M<->R", "Martha", "Roger").unwrap();
    graph.add_undirected_edge_with_key("M<->J", "Martha", "John").unwrap();
    graph.add_undirected_edge_with_key("J<->R", "John", "Roger").unwrap();
    graph.add_undirected_edge_with_key("T<->M", "Thomas", "Martha").unwrap();

    graph
}

pub fn sorted(mut keys: Vec<String>) -> Vec<String> {
    keys.sort();
    keys
}

pub fn strings<T: ToString>(keys: &[T]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}
