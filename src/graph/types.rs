//! Core type definitions for the multigraph
//!
//! Node and edge identifiers are canonicalized once, at the store boundary.
//! Every identifier handed to the graph goes through one of the `From`
//! conversions below and is compared as an opaque string from then on, so
//! `1u64` and `"1"` name the same node.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! key_type {
    (@int $name:ident, $($int:ty),*) => {
        $(
            impl From<$int> for $name {
                fn from(n: $int) -> Self {
                    $name(Arc::from(n.to_string()))
                }
            }
        )*
    };
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(key: impl Into<$name>) -> Self {
                key.into()
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(Arc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(Arc::from(s))
            }
        }

        impl From<&String> for $name {
            fn from(s: &String) -> Self {
                $name(Arc::from(s.as_str()))
            }
        }

        impl From<&$name> for $name {
            fn from(key: &$name) -> Self {
                key.clone()
            }
        }

        key_type!(@int $name, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                &*self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                &*self.0 == *other
            }
        }
    };
}

key_type!(
    /// Canonical identifier of a node
    NodeKey
);

key_type!(
    /// Canonical identifier of an edge, unique graph-wide and independent
    /// of node keys
    EdgeKey
);

/// Graph discipline, and the declared type of a query variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    /// Only directed edges; `undirected` collections stay empty
    Directed,
    /// Only undirected edges; `in` / `out` collections stay empty
    Undirected,
    /// Both kinds may coexist
    #[default]
    Mixed,
}

impl GraphType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphType::Directed => "directed",
            GraphType::Undirected => "undirected",
            GraphType::Mixed => "mixed",
        }
    }

    /// Whether an edge of the given directedness may live in a graph of
    /// this discipline.
    pub fn accepts(&self, directed: bool) -> bool {
        match self {
            GraphType::Mixed => true,
            GraphType::Directed => directed,
            GraphType::Undirected => !directed,
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
