use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for vertex identities.
///
/// A vertex is an opaque identity with equality and hash semantics; it carries
/// no algorithm state. Any cheap-to-clone identity type qualifies.
pub trait Vertex: Clone + Eq + Hash + Debug {}

impl<T> Vertex for T where T: Clone + Eq + Hash + Debug {}

/// Trait representing a directed edge between two vertices.
///
/// Equality is expected to identify the link itself (source and destination
/// identity), not any cost attached to it.
pub trait Edge<V: Vertex>: Clone + Eq + Hash + Debug {
    /// Returns the source vertex of the edge
    fn src(&self) -> &V;

    /// Returns the destination vertex of the edge
    fn dst(&self) -> &V;
}

/// Trait representing a directed graph of vertices and edges
pub trait Graph<V: Vertex, E: Edge<V>>: Debug {
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over all vertices
    fn vertices(&self) -> Box<dyn Iterator<Item = &V> + '_>;

    /// Returns an iterator over all edges
    fn edges(&self) -> Box<dyn Iterator<Item = &E> + '_>;

    /// Returns an iterator over the edges leaving the given vertex
    fn edges_from(&self, vertex: &V) -> Box<dyn Iterator<Item = &E> + '_>;

    /// Returns an iterator over the edges entering the given vertex
    fn edges_to(&self, vertex: &V) -> Box<dyn Iterator<Item = &E> + '_>;

    /// Returns true if the vertex exists in the graph
    fn contains_vertex(&self, vertex: &V) -> bool;

    /// Returns true if the edge exists in the graph
    fn contains_edge(&self, edge: &E) -> bool;
}

/// Trait for mutable graph operations
pub trait MutableGraph<V: Vertex, E: Edge<V>>: Graph<V, E> {
    /// Adds a vertex to the graph; returns false if it was already present
    fn add_vertex(&mut self, vertex: V) -> bool;

    /// Removes a vertex and its incident edges from the graph
    fn remove_vertex(&mut self, vertex: &V) -> bool;

    /// Adds a directed edge, inserting any endpoint not yet in the graph;
    /// returns false if the edge was already present
    fn add_edge(&mut self, edge: E) -> bool;

    /// Removes an edge from the graph
    fn remove_edge(&mut self, edge: &E) -> bool;
}
