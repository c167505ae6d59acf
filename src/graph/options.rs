//! Graph construction options

use super::types::GraphType;
use serde::{Deserialize, Serialize};

/// Options fixed when a graph is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Discipline: which kinds of edges the graph accepts
    #[serde(rename = "type")]
    pub graph_type: GraphType,
    /// Allow several edges between the same endpoints
    pub multi: bool,
    pub allow_self_loops: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            graph_type: GraphType::Mixed,
            multi: false,
            allow_self_loops: true,
        }
    }
}

impl GraphOptions {
    pub fn directed() -> Self {
        Self {
            graph_type: GraphType::Directed,
            ..Self::default()
        }
    }

    pub fn undirected() -> Self {
        Self {
            graph_type: GraphType::Undirected,
            ..Self::default()
        }
    }

    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn with_self_loops(mut self, allow: bool) -> Self {
        self.allow_self_loops = allow;
        self
    }
}
