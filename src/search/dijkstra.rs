use log::{debug, trace};
use std::cmp::Ordering;

use crate::collections::CostHeap;
use crate::graph::{Edge, Graph, Vertex};
use crate::search::path::{Path, SearchResult};
use crate::weight::weigher::EdgeWeigher;
use crate::weight::Weight;
use crate::{Error, Result};

/// Single-source shortest-path search with bounded multi-path
/// reconstruction.
///
/// The scan is the classic priority-ordered relaxation with lazy deletion.
/// Costs that tie within the weight type's tolerance accrue additional
/// parent edges instead of replacing them, which is what allows
/// reconstruction of several equal-cost shortest paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct DijkstraSearch {
    allow_negative: bool,
}

impl DijkstraSearch {
    /// Creates a search that rejects negative edge weights during relaxation
    pub fn new() -> Self {
        DijkstraSearch {
            allow_negative: false,
        }
    }

    /// Permits negative edge weights during relaxation.
    ///
    /// Ordinary searches must leave this off; the disjoint-path
    /// transformation turns it on because its residual edges carry negated
    /// weights. With negatives permitted the scan keeps re-expanding
    /// improved vertices and does not stop early at the destination.
    pub fn allowing_negative_edges(mut self, allowed: bool) -> Self {
        self.allow_negative = allowed;
        self
    }

    /// Computes shortest paths from `src`, to `dst` when given or to every
    /// reachable vertex otherwise, with every edge permitted.
    ///
    /// `max_paths` bounds how many equal-cost parent edges are retained per
    /// vertex and how many paths are reconstructed per destination; `None`
    /// reconstructs all of them.
    pub fn search<V, E, G, Wr>(
        &self,
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
        self.search_filtered(graph, src, dst, weigher, max_paths, |_| true)
    }

    /// [`search`](Self::search) restricted to edges accepted by `permit`
    pub fn search_filtered<V, E, G, Wr, P>(
        &self,
        graph: &G,
        src: &V,
        dst: Option<&V>,
        weigher: &Wr,
        max_paths: Option<usize>,
        permit: P,
    ) -> Result<SearchResult<V, E, Wr::W>>
    where
        V: Vertex,
        E: Edge<V>,
        G: Graph<V, E> + ?Sized,
        Wr: EdgeWeigher<V, E>,
        P: Fn(&E) -> bool,
    {
        if !graph.contains_vertex(src) {
            return Err(Error::SourceNotFound);
        }
        if let Some(d) = dst {
            if !graph.contains_vertex(d) {
                return Err(Error::DestinationNotFound);
            }
        }

        debug!(
            "dijkstra: searching from {:?} over {} vertices / {} edges",
            src,
            graph.vertex_count(),
            graph.edge_count()
        );

        let mut result = SearchResult::new(src.clone());
        result.costs.insert(src.clone(), weigher.initial_weight());

        let mut heap = CostHeap::new();
        heap.push(src.clone(), weigher.initial_weight());

        while let Some((u, cost_u)) = heap.pop() {
            // Lazy deletion: skip entries superseded by a later improvement
            let stale = result
                .costs
                .get(&u)
                .map_or(true, |c| c.compare(&cost_u) == Ordering::Less);
            if stale {
                continue;
            }

            // The extracted minimum is final for non-negative weights; with
            // negatives permitted the destination may still improve later
            if !self.allow_negative && dst == Some(&u) {
                break;
            }

            for edge in graph.edges_from(&u) {
                if !permit(edge) {
                    continue;
                }

                let weight = weigher.weight(edge);
                if !weight.is_viable() {
                    continue;
                }
                if weight.is_negative() && !self.allow_negative {
                    continue;
                }

                let new_cost = cost_u.merge(&weight);
                let v = edge.dst();
                match result.costs.get(v) {
                    None => {
                        trace!("dijkstra: reached {:?} at {:?}", v, new_cost);
                        result.costs.insert(v.clone(), new_cost.clone());
                        result.parents.insert(v.clone(), vec![edge.clone()]);
                        heap.push(v.clone(), new_cost);
                    }
                    Some(current) => match new_cost.compare(current) {
                        Ordering::Less => {
                            trace!("dijkstra: improved {:?} to {:?}", v, new_cost);
                            result.costs.insert(v.clone(), new_cost.clone());
                            result.parents.insert(v.clone(), vec![edge.clone()]);
                            heap.push(v.clone(), new_cost);
                        }
                        Ordering::Equal => {
                            // An equal-cost parent; retain it up to the bound
                            let parents = result.parents.entry(v.clone()).or_default();
                            if !parents.contains(edge)
                                && max_paths.map_or(true, |m| parents.len() < m)
                            {
                                parents.push(edge.clone());
                            }
                        }
                        Ordering::Greater => {}
                    },
                }
            }
        }

        match dst {
            Some(d) => build_paths(&mut result, d, max_paths),
            None => {
                let reached: Vec<V> = result.costs.keys().cloned().collect();
                for d in &reached {
                    build_paths(&mut result, d, max_paths);
                }
            }
        }

        debug!(
            "dijkstra: reached {} vertices, reconstructed {} paths",
            result.costs.len(),
            result.paths.len()
        );
        Ok(result)
    }
}

/// Reconstructs up to `max_paths` shortest paths ending at `dst` from the
/// parent-edge sets, walking backwards and branching once per parent edge.
fn build_paths<V, E, W>(result: &mut SearchResult<V, E, W>, dst: &V, max_paths: Option<usize>)
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    let Some(cost) = result.costs.get(dst).cloned() else {
        return;
    };

    let mut completed = Vec::new();
    // In-progress paths, each a contiguous edge suffix ending at dst
    let mut pending: Vec<Vec<E>> = vec![Vec::new()];

    while let Some(partial) = pending.pop() {
        let head = partial
            .first()
            .map_or_else(|| dst.clone(), |e| e.src().clone());

        if head == result.src {
            completed.push(Path::new(
                result.src.clone(),
                dst.clone(),
                partial,
                cost.clone(),
            ));
            if max_paths.map_or(false, |m| completed.len() >= m) {
                break;
            }
            continue;
        }

        let Some(parents) = result.parents.get(&head) else {
            continue;
        };
        for parent in parents {
            // Cycle rejection: never re-enter a vertex the path already
            // visits
            if parent.src() == dst || partial.iter().any(|e| e.src() == parent.src()) {
                continue;
            }
            let mut branched = Vec::with_capacity(partial.len() + 1);
            branched.push(parent.clone());
            branched.extend(partial.iter().cloned());
            pending.push(branched);
        }
    }

    result.paths.extend(completed);
}
