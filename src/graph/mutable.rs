use crate::graph::traits::{Edge, Graph, MutableGraph, Vertex};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;

/// A mutable directed graph used as a per-search working copy.
///
/// Holds the same content as [`DirectedGraph`](crate::DirectedGraph) but
/// supports adding and removing vertices and edges. The disjoint-path
/// transformation seeds one of these from the caller's immutable graph and
/// reshapes it freely; the original graph is never touched.
#[derive(Debug, Clone, Default)]
pub struct MutableDirectedGraph<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    vertices: HashSet<V>,
    edges: HashSet<E>,
    sources: HashMap<V, Vec<E>>,
    destinations: HashMap<V, Vec<E>>,
}

impl<V, E> MutableDirectedGraph<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    /// Creates an empty graph
    pub fn new() -> Self {
        MutableDirectedGraph {
            vertices: HashSet::new(),
            edges: HashSet::new(),
            sources: HashMap::new(),
            destinations: HashMap::new(),
        }
    }

    /// Creates a working copy holding the same vertices and edges as `graph`
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: Graph<V, E> + ?Sized,
    {
        let mut copy = MutableDirectedGraph::new();
        for vertex in graph.vertices() {
            copy.add_vertex(vertex.clone());
        }
        for edge in graph.edges() {
            copy.add_edge(edge.clone());
        }
        copy
    }
}

impl<V, E> Graph<V, E> for MutableDirectedGraph<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.vertices.iter())
    }

    fn edges(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.edges.iter())
    }

    fn edges_from(&self, vertex: &V) -> Box<dyn Iterator<Item = &E> + '_> {
        match self.sources.get(vertex) {
            Some(edges) => Box::new(edges.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn edges_to(&self, vertex: &V) -> Box<dyn Iterator<Item = &E> + '_> {
        match self.destinations.get(vertex) {
            Some(edges) => Box::new(edges.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.edges.contains(edge)
    }
}

impl<V, E> MutableGraph<V, E> for MutableDirectedGraph<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    fn add_vertex(&mut self, vertex: V) -> bool {
        self.vertices.insert(vertex)
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        if !self.vertices.remove(vertex) {
            return false;
        }

        // Drop every edge incident to the vertex from all indices
        let incident: Vec<E> = self
            .edges
            .iter()
            .filter(|e| e.src() == vertex || e.dst() == vertex)
            .cloned()
            .collect();
        for edge in incident {
            self.remove_edge(&edge);
        }

        self.sources.remove(vertex);
        self.destinations.remove(vertex);
        true
    }

    fn add_edge(&mut self, edge: E) -> bool {
        if !self.edges.insert(edge.clone()) {
            return false;
        }

        self.vertices.insert(edge.src().clone());
        self.vertices.insert(edge.dst().clone());
        self.sources
            .entry(edge.src().clone())
            .or_default()
            .push(edge.clone());
        self.destinations
            .entry(edge.dst().clone())
            .or_default()
            .push(edge);
        true
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        if !self.edges.remove(edge) {
            return false;
        }

        if let Some(outgoing) = self.sources.get_mut(edge.src()) {
            outgoing.retain(|e| e != edge);
        }
        if let Some(incoming) = self.destinations.get_mut(edge.dst()) {
            incoming.retain(|e| e != edge);
        }
        true
    }
}
