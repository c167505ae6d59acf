//! Errors raised by graph mutations and queries

use super::types::{EdgeKey, NodeKey};
use thiserror::Error;

/// Errors that can occur during graph operations
///
/// Queries only ever raise [`GraphError::NotFound`],
/// [`GraphError::InvalidArguments`] and [`GraphError::BunchNotAccepted`].
/// A pair of valid but disconnected
/// nodes, or a query whose declared type conflicts with the graph
/// discipline, yields an empty result instead of an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("{operation}: could not find the \"{key}\" node in the graph")]
    NotFound {
        operation: &'static str,
        key: NodeKey,
    },

    #[error("{operation}: invalid number of arguments (expecting {expected} and got {received})")]
    InvalidArguments {
        operation: &'static str,
        expected: &'static str,
        received: usize,
    },

    #[error("{operation}: a bunch of nodes is not accepted as argument {position}")]
    BunchNotAccepted {
        operation: &'static str,
        position: usize,
    },

    #[error("{operation}: could not find the \"{key}\" edge in the graph")]
    EdgeNotFound {
        operation: &'static str,
        key: EdgeKey,
    },

    #[error("{operation}: the \"{key}\" node already exists in the graph")]
    NodeAlreadyExists {
        operation: &'static str,
        key: NodeKey,
    },

    #[error("{operation}: the \"{key}\" edge already exists in the graph")]
    EdgeAlreadyExists {
        operation: &'static str,
        key: EdgeKey,
    },

    #[error("{operation}: {message}")]
    Usage {
        operation: &'static str,
        message: String,
    },
}

impl GraphError {
    pub(crate) fn not_found(operation: &'static str, key: &NodeKey) -> Self {
        GraphError::NotFound {
            operation,
            key: key.clone(),
        }
    }

    pub(crate) fn usage(operation: &'static str, message: impl Into<String>) -> Self {
        GraphError::Usage {
            operation,
            message: message.into(),
        }
    }

    /// Name of the operation that raised the error
    pub fn operation(&self) -> &'static str {
        match self {
            GraphError::NotFound { operation, .. }
            | GraphError::InvalidArguments { operation, .. }
            | GraphError::BunchNotAccepted { operation, .. }
            | GraphError::EdgeNotFound { operation, .. }
            | GraphError::NodeAlreadyExists { operation, .. }
            | GraphError::EdgeAlreadyExists { operation, .. }
            | GraphError::Usage { operation, .. } => operation,
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = GraphError::not_found("in_edges", &NodeKey::new("Test"));
        assert_eq!(
            err.to_string(),
            "in_edges: could not find the \"Test\" node in the graph"
        );
        assert_eq!(err.operation(), "in_edges");
    }

    #[test]
    fn test_invalid_arguments_message() {
        let err = GraphError::InvalidArguments {
            operation: "neighbors",
            expected: "1 or 2",
            received: 3,
        };
        assert_eq!(
            err.to_string(),
            "neighbors: invalid number of arguments (expecting 1 or 2 and got 3)"
        );
    }

    #[test]
    fn test_bunch_not_accepted_message() {
        let err = GraphError::BunchNotAccepted {
            operation: "out_neighbors",
            position: 1,
        };
        assert_eq!(
            err.to_string(),
            "out_neighbors: a bunch of nodes is not accepted as argument 1"
        );
        assert_eq!(err.operation(), "out_neighbors");
    }
}
