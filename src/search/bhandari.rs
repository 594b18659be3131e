use log::debug;

use crate::graph::{Edge, Graph, Vertex};
use crate::search::dijkstra::DijkstraSearch;
use crate::search::path::Path;
use crate::search::transform::{TaggedKind, TaggedVertex, TransformState};
use crate::weight::scalar::ScalarWeight;
use crate::weight::weigher::EdgeWeigher;
use crate::weight::Weight;
use crate::{Error, Result};

/// Link-penalty default: far above any realistic path cost, so a previously
/// used link is re-selected only when no independent alternative exists
pub const DEFAULT_LINK_PENALTY: f64 = 1.0e9;

/// Node-penalty default: orders of magnitude below the link penalty so that
/// sharing a node is always preferred over sharing a link
pub const DEFAULT_NODE_PENALTY: f64 = 1.0e6;

/// What "disjoint" means for a set of protection paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disjointness {
    /// No edge may appear in two paths; vertex reuse is tolerated
    Link,
    /// Additionally, no interior vertex may appear in two paths
    Node,
}

/// Outcome of a disjoint-path search: either the full requested set, or an
/// explicit report that fewer independent routes exist. Never a partial
/// result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisjointOutcome<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    /// Exactly the requested number of mutually disjoint paths
    Paths(Vec<Path<V, E, W>>),
    /// Fewer than `requested` independent routes exist
    Insufficient { found: usize, requested: usize },
}

impl<V, E, W> DisjointOutcome<V, E, W>
where
    V: Vertex,
    E: Edge<V>,
    W: Weight,
{
    /// Returns true when the full requested set was found
    pub fn is_sufficient(&self) -> bool {
        matches!(self, DisjointOutcome::Paths(_))
    }

    /// Returns the paths, if the full set was found
    pub fn paths(&self) -> Option<&[Path<V, E, W>]> {
        match self {
            DisjointOutcome::Paths(paths) => Some(paths),
            DisjointOutcome::Insufficient { .. } => None,
        }
    }
}

/// Disjoint-path search by successive shortest paths over a transformed
/// graph (the Suurballe/Bhandari technique).
///
/// Each iteration folds the previously finalized paths into a working copy
/// of the graph (residual reversed edges let the next search cancel an
/// earlier choice at negated cost, penalties make reuse a last resort),
/// runs an ordinary Dijkstra over the copy, and untangles the raw result
/// against the earlier paths into genuinely disjoint routes.
#[derive(Debug, Clone)]
pub struct BhandariSearch<W> {
    disjointness: Disjointness,
    allow_shared_links: bool,
    allow_shared_nodes: bool,
    link_penalty: W,
    node_penalty: W,
}

impl BhandariSearch<ScalarWeight> {
    /// Creates a link-disjoint search with the default penalties
    pub fn link_disjoint() -> Self {
        BhandariSearch::new(
            Disjointness::Link,
            ScalarWeight::new(DEFAULT_LINK_PENALTY),
            ScalarWeight::new(DEFAULT_NODE_PENALTY),
        )
    }

    /// Creates a node-disjoint search with the default penalties
    pub fn node_disjoint() -> Self {
        BhandariSearch::new(
            Disjointness::Node,
            ScalarWeight::new(DEFAULT_LINK_PENALTY),
            ScalarWeight::new(DEFAULT_NODE_PENALTY),
        )
    }
}

impl<W: Weight> BhandariSearch<W> {
    /// Creates a search with explicit penalty magnitudes; both must be far
    /// larger than any realistic path cost, with the node penalty well below
    /// the link penalty
    pub fn new(disjointness: Disjointness, link_penalty: W, node_penalty: W) -> Self {
        BhandariSearch {
            disjointness,
            allow_shared_links: false,
            allow_shared_nodes: false,
            link_penalty,
            node_penalty,
        }
    }

    /// Tolerates taxed link reuse in the returned paths instead of reporting
    /// the set as insufficient
    pub fn with_shared_links(mut self, allowed: bool) -> Self {
        self.allow_shared_links = allowed;
        self
    }

    /// Tolerates taxed node reuse in the returned paths instead of reporting
    /// the set as insufficient
    pub fn with_shared_nodes(mut self, allowed: bool) -> Self {
        self.allow_shared_nodes = allowed;
        self
    }

    /// Computes `k` mutually disjoint paths from `src` to `dst`, or reports
    /// how many independent routes actually exist.
    ///
    /// Path costs are computed with the caller's weigher over the final edge
    /// sequences; the penalized and negated working weights never leak into
    /// the result.
    pub fn search_disjoint<V, E, G, Wr>(
        &self,
        graph: &G,
        src: &V,
        dst: &V,
        weigher: &Wr,
        k: usize,
    ) -> Result<DisjointOutcome<V, E, W>>
    where
        V: Vertex,
        E: Edge<V>,
        G: Graph<V, E> + ?Sized,
        Wr: EdgeWeigher<V, E, W = W>,
    {
        if !graph.contains_vertex(src) {
            return Err(Error::SourceNotFound);
        }
        if !graph.contains_vertex(dst) {
            return Err(Error::DestinationNotFound);
        }
        if src == dst {
            return Err(Error::IdenticalEndpoints);
        }
        if k == 0 {
            return Ok(DisjointOutcome::Paths(Vec::new()));
        }

        let dijkstra = DijkstraSearch::new();
        let initial = dijkstra.search(graph, src, Some(dst), weigher, Some(1))?;
        let Some(first) = initial.paths().first() else {
            return Ok(DisjointOutcome::Insufficient {
                found: 0,
                requested: k,
            });
        };

        let mut working: Vec<Vec<Trace<E>>> = vec![first
            .edges()
            .iter()
            .cloned()
            .map(Trace::Forward)
            .collect()];

        let residual_search = DijkstraSearch::new().allowing_negative_edges(true);
        while working.len() < k {
            debug!(
                "bhandari: computing path {} of {} from {:?} to {:?}",
                working.len() + 1,
                k,
                src,
                dst
            );

            let mut state = TransformState::new(graph, weigher);
            for path in &working {
                self.transform_for_path(&mut state, path);
            }

            let raw = residual_search.search(
                &state.graph,
                &TaggedVertex::Real(src.clone()),
                Some(&TaggedVertex::Real(dst.clone())),
                &state.weigher,
                Some(1),
            )?;
            let Some(raw_path) = raw.paths().first() else {
                return Ok(DisjointOutcome::Insufficient {
                    found: working.len(),
                    requested: k,
                });
            };

            // Unwind the raw result onto original edges: proxies unwrap (and
            // re-enable their original), residual traversals become backward
            // marks, bridges vanish
            let mut traces = Vec::with_capacity(raw_path.len());
            for edge in raw_path.edges() {
                match &edge.kind {
                    TaggedKind::Real(original) => traces.push(Trace::Forward(original.clone())),
                    TaggedKind::Proxy(original) => {
                        state.unban(original);
                        traces.push(Trace::Forward(original.clone()));
                    }
                    TaggedKind::Residual(original) => {
                        traces.push(Trace::Backward(original.clone()))
                    }
                    TaggedKind::Bridge => {}
                }
            }
            working.push(traces);

            untangle(&mut working);

            // Every residual traversal must have cancelled against some
            // earlier path; anything left means the correction failed
            let residue = working
                .iter()
                .any(|p| p.iter().any(|t| matches!(t, Trace::Backward(_))));
            if residue {
                return Ok(DisjointOutcome::Insufficient {
                    found: working.len() - 1,
                    requested: k,
                });
            }
        }

        let paths: Vec<Vec<E>> = working
            .into_iter()
            .map(|traces| {
                traces
                    .into_iter()
                    .map(|t| match t {
                        Trace::Forward(e) => e,
                        Trace::Backward(_) => unreachable!("residue checked above"),
                    })
                    .collect()
            })
            .collect();

        if !self.is_disjoint_set::<V, E>(&paths) {
            let found = self.disjoint_subset_size::<V, E>(&paths);
            return Ok(DisjointOutcome::Insufficient {
                found,
                requested: k,
            });
        }

        let finalized = paths
            .into_iter()
            .map(|edges| {
                let cost = edges
                    .iter()
                    .fold(weigher.initial_weight(), |acc, e| acc.merge(&weigher.weight(e)));
                Path::new(src.clone(), dst.clone(), edges, cost)
            })
            .collect();

        Ok(DisjointOutcome::Paths(finalized))
    }

    /// Folds one finalized path into the working graph, walking its edges
    /// from the destination back to the source
    fn transform_for_path<V, E, Wr>(
        &self,
        state: &mut TransformState<'_, V, E, Wr>,
        path: &[Trace<E>],
    ) where
        V: Vertex,
        E: Edge<V>,
        Wr: EdgeWeigher<V, E, W = W>,
    {
        let edges: Vec<&E> = path
            .iter()
            .map(|t| match t {
                Trace::Forward(e) => e,
                Trace::Backward(e) => e,
            })
            .collect();
        let m = edges.len();
        if m == 0 {
            return;
        }

        // The edge nearest the destination gets the reverse/tax treatment
        // on its own; its destination is an endpoint, never split
        state.reverse_and_tax(edges[m - 1], &self.link_penalty);

        for j in (1..m).rev() {
            let entry = edges[j - 1];
            let vertex = entry.dst().clone();

            match self.disjointness {
                Disjointness::Link => {
                    state.reverse_and_tax(entry, &self.link_penalty);
                }
                Disjointness::Node => {
                    if state.is_split(&vertex) {
                        // Common-node collision with an earlier path: tax
                        // instead of re-splitting
                        state.tax_all_incoming(&vertex, &self.node_penalty);
                        state.reverse_and_tax(entry, &self.link_penalty);
                    } else {
                        state.reverse_and_tax(entry, &self.link_penalty);
                        state.tax_node_entry(&vertex, entry, &self.node_penalty);
                        state.split_vertex(&vertex, entry, edges[j], &self.node_penalty);
                    }
                }
            }
        }
    }

    /// Checks pairwise disjointness of the final set under the configured
    /// policy
    fn is_disjoint_set<V, E>(&self, paths: &[Vec<E>]) -> bool
    where
        V: Vertex,
        E: Edge<V>,
    {
        for (i, a) in paths.iter().enumerate() {
            for b in paths.iter().skip(i + 1) {
                if !self.pair_disjoint::<V, E>(a, b) {
                    return false;
                }
            }
        }
        true
    }

    fn pair_disjoint<V, E>(&self, a: &[E], b: &[E]) -> bool
    where
        V: Vertex,
        E: Edge<V>,
    {
        if !self.allow_shared_links && a.iter().any(|e| b.contains(e)) {
            return false;
        }

        if self.disjointness == Disjointness::Node && !self.allow_shared_nodes {
            // Interior vertices only; the shared endpoints are expected
            let interior: Vec<&V> = a.iter().skip(1).map(|e| e.src()).collect();
            let shared = b
                .iter()
                .skip(1)
                .map(|e| e.src())
                .any(|v| interior.contains(&v));
            if shared {
                return false;
            }
        }

        true
    }

    /// Size of a maximal greedily-chosen disjoint subset, reported when the
    /// full set fails validation
    fn disjoint_subset_size<V, E>(&self, paths: &[Vec<E>]) -> usize
    where
        V: Vertex,
        E: Edge<V>,
    {
        let mut kept: Vec<&Vec<E>> = Vec::new();
        for path in paths {
            if kept
                .iter()
                .all(|k| self.pair_disjoint::<V, E>(k.as_slice(), path))
            {
                kept.push(path);
            }
        }
        kept.len()
    }
}

/// One traversal step of a raw candidate path: a real edge taken forward, or
/// a residual cancellation of an earlier path's edge
#[derive(Debug, Clone, PartialEq, Eq)]
enum Trace<E> {
    Forward(E),
    Backward(E),
}

/// Removes cancelling edge pairs between the candidate paths, swapping the
/// path tails around each cancellation window, until none remain.
///
/// Each swap deletes the window's traces outright, so the loop strictly
/// shrinks the total trace count and terminates.
fn untangle<E: PartialEq>(paths: &mut [Vec<Trace<E>>]) {
    loop {
        let mut window = None;
        // Decreasing recency on both sides: the newest path is corrected
        // against the most recently finalized one first
        'scan: for a in (0..paths.len()).rev() {
            for b in (0..paths.len()).rev() {
                if a == b {
                    continue;
                }
                if let Some((j, i, len)) = find_cancellation(&paths[a], &paths[b]) {
                    window = Some((a, b, j, i, len));
                    break 'scan;
                }
            }
        }

        let Some((a, b, j, i, len)) = window else {
            break;
        };
        swap_windows(paths, a, b, j, i, len);
    }
}

/// Finds a maximal contiguous run where `p` traverses the reverse of `q`'s
/// edges: p[j+t] cancels q[i-t] for t in 0..len
fn find_cancellation<E: PartialEq>(
    p: &[Trace<E>],
    q: &[Trace<E>],
) -> Option<(usize, usize, usize)> {
    for j in 0..p.len() {
        let Trace::Backward(edge) = &p[j] else {
            continue;
        };
        let Some(i) = q
            .iter()
            .position(|t| matches!(t, Trace::Forward(f) if f == edge))
        else {
            continue;
        };

        let mut len = 1;
        while j + len < p.len() && len <= i {
            match (&p[j + len], &q[i - len]) {
                (Trace::Backward(x), Trace::Forward(y)) if x == y => len += 1,
                _ => break,
            }
        }
        return Some((j, i, len));
    }
    None
}

/// Swaps the tails of two paths around a cancellation window, dropping the
/// cancelling traces: the prefix of each path continues into the suffix of
/// the other
fn swap_windows<E>(
    paths: &mut [Vec<Trace<E>>],
    a: usize,
    b: usize,
    j: usize,
    i: usize,
    len: usize,
) {
    let mut pa = std::mem::take(&mut paths[a]);
    let mut pb = std::mem::take(&mut paths[b]);

    let pa_tail = pa.split_off(j + len);
    pa.truncate(j);
    let pb_tail = pb.split_off(i + 1);
    pb.truncate(i + 1 - len);

    pa.extend(pb_tail);
    pb.extend(pa_tail);

    paths[a] = pa;
    paths[b] = pb;
}
