use crate::graph::{Edge, Vertex};
use crate::weight::Weight;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// A directed path: a contiguous edge sequence from `src` to `dst` with its
/// aggregate cost.
///
/// A zero-edge path (src == dst) is legal and represents the trivial route
/// from a vertex to itself. Identity covers endpoints and edge sequence;
/// the cost is derived data and excluded from equality.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    src: V,
    dst: V,
    edges: Vec<E>,
    cost: W,
}

impl<V, E, W> Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    /// Creates a path from a contiguous edge sequence
    pub fn new(src: V, dst: V, edges: Vec<E>, cost: W) -> Self {
        debug_assert!(
            edges.windows(2).all(|pair| pair[0].dst() == pair[1].src()),
            "path edges must be contiguous"
        );
        debug_assert!(edges.first().map_or(src == dst, |e| *e.src() == src));
        debug_assert!(edges.last().map_or(src == dst, |e| *e.dst() == dst));

        Path {
            src,
            dst,
            edges,
            cost,
        }
    }

    /// Returns the first vertex of the path
    pub fn src(&self) -> &V {
        &self.src
    }

    /// Returns the last vertex of the path
    pub fn dst(&self) -> &V {
        &self.dst
    }

    /// Returns the edge sequence
    pub fn edges(&self) -> &[E] {
        &self.edges
    }

    /// Returns the aggregate cost of the path
    pub fn cost(&self) -> &W {
        &self.cost
    }

    /// Returns the number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true for the trivial zero-edge path
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns an iterator over the vertices along the path, endpoints
    /// included
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        std::iter::once(&self.src).chain(self.edges.iter().map(|e| e.dst()))
    }
}

impl<V, E, W> PartialEq for Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src && self.dst == other.dst && self.edges == other.edges
    }
}

impl<V, E, W> Eq for Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
}

impl<V, E, W> Hash for Path<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.src.hash(state);
        self.dst.hash(state);
        self.edges.hash(state);
    }
}

/// Outcome of one shortest-path search.
///
/// Holds the best known cost per reached vertex, the parent edges achieving
/// that cost (bounded by the search's `max_paths`), and the reconstructed
/// paths. Created fresh per search call; owns no part of the graph.
#[derive(Debug, Clone)]
pub struct SearchResult<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    pub(crate) src: V,
    pub(crate) costs: HashMap<V, W>,
    pub(crate) parents: HashMap<V, Vec<E>>,
    pub(crate) paths: Vec<Path<V, E, W>>,
}

impl<V, E, W> SearchResult<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    pub(crate) fn new(src: V) -> Self {
        SearchResult {
            src,
            costs: HashMap::new(),
            parents: HashMap::new(),
            paths: Vec::new(),
        }
    }

    /// Returns the source vertex of the search
    pub fn src(&self) -> &V {
        &self.src
    }

    /// Returns the best known cost to the given vertex, if reached
    pub fn cost(&self, vertex: &V) -> Option<&W> {
        self.costs.get(vertex)
    }

    /// Returns the parent edges achieving the best cost to the given vertex
    pub fn parent_edges(&self, vertex: &V) -> &[E] {
        self.parents.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Returns every reconstructed path
    pub fn paths(&self) -> &[Path<V, E, W>] {
        &self.paths
    }

    /// Returns the reconstructed paths ending at the given vertex
    pub fn paths_to<'a>(&'a self, dst: &'a V) -> impl Iterator<Item = &'a Path<V, E, W>> + 'a {
        self.paths.iter().filter(move |p| p.dst() == dst)
    }
}
