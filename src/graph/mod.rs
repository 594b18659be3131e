pub mod directed;
pub mod generators;
pub mod mutable;
pub mod traits;

pub use directed::DirectedGraph;
pub use mutable::MutableDirectedGraph;
pub use traits::{Edge, Graph, MutableGraph, Vertex};
