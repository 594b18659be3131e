pub mod bhandari;
pub mod dijkstra;
pub mod path;
mod transform;

pub use bhandari::{BhandariSearch, DisjointOutcome, Disjointness};
pub use dijkstra::DijkstraSearch;
pub use path::{Path, SearchResult};

use crate::graph::{Edge, Graph, Vertex};
use crate::weight::weigher::{EdgeWeigher, HopCountWeigher};
use crate::weight::scalar::ScalarWeight;
use crate::Result;

/// Computes the least-cost path(s) from `src`, to `dst` when given or to
/// every reachable vertex otherwise, reconstructing up to `max_paths`
/// equal-cost alternatives per destination (`None` reconstructs all).
pub fn shortest_paths<V, E, G, Wr>(
    graph: &G,
    src: &V,
    dst: Option<&V>,
    weigher: &Wr,
    max_paths: Option<usize>,
) -> Result<SearchResult<V, E, Wr::W>>
where
    V: Vertex,
    E: Edge<V>,
    G: Graph<V, E> + ?Sized,
    Wr: EdgeWeigher<V, E>,
{
    DijkstraSearch::new().search(graph, src, dst, weigher, max_paths)
}

/// [`shortest_paths`] under the uniform hop-count weigher
pub fn shortest_paths_by_hops<V, E, G>(
    graph: &G,
    src: &V,
    dst: Option<&V>,
    max_paths: Option<usize>,
) -> Result<SearchResult<V, E, ScalarWeight>>
where
    V: Vertex,
    E: Edge<V>,
    G: Graph<V, E> + ?Sized,
{
    DijkstraSearch::new().search(graph, src, dst, &HopCountWeigher::new(), max_paths)
}

/// Computes `k` mutually link-disjoint least-combined-cost paths between the
/// endpoints, or reports that fewer exist. Use [`BhandariSearch`] directly
/// for node-disjointness or custom penalty policy.
pub fn disjoint_paths<V, E, G, Wr>(
    graph: &G,
    src: &V,
    dst: &V,
    weigher: &Wr,
    k: usize,
) -> Result<DisjointOutcome<V, E, Wr::W>>
where
    V: Vertex,
    E: Edge<V>,
    G: Graph<V, E> + ?Sized,
    Wr: EdgeWeigher<V, E, W = ScalarWeight>,
{
    BhandariSearch::link_disjoint().search_disjoint(graph, src, dst, weigher, k)
}
