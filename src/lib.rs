//! Resilink - Least-Cost and Disjoint Path Search
//!
//! This library computes shortest paths and mutually disjoint path sets on
//! weighted directed graphs, using the successive-shortest-paths technique of
//! the Suurballe/Bhandari family (residual reversed edges plus path
//! untangling).
//!
//! Callers build an immutable [`DirectedGraph`] from a topology snapshot,
//! supply an [`EdgeWeigher`], and invoke either [`DijkstraSearch`] for
//! ordinary (multi-)shortest paths or [`BhandariSearch`] for k link- or
//! node-disjoint protection routes.

pub mod collections;
pub mod graph;
pub mod search;
pub mod weight;

pub use graph::directed::DirectedGraph;
pub use graph::mutable::MutableDirectedGraph;
pub use graph::{Edge, Graph, MutableGraph, Vertex};
/// Re-export main types for convenient use
pub use search::bhandari::{BhandariSearch, DisjointOutcome, Disjointness};
pub use search::dijkstra::DijkstraSearch;
pub use search::{Path, SearchResult};
pub use weight::scalar::ScalarWeight;
pub use weight::weigher::{EdgeWeigher, HopCountWeigher};
pub use weight::Weight;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Destination vertex not found in graph")]
    DestinationNotFound,

    #[error("Disjoint path search requires distinct source and destination")]
    IdenticalEndpoints,
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
