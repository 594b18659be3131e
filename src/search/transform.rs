//! Working-graph machinery for the disjoint-path transformation.
//!
//! The transformation never touches the caller's graph or weigher. It
//! operates on a mutable copy whose vertices and edges are tagged variants:
//! real elements wrap the caller's, synthetic elements (shadows, residuals,
//! proxies, bridges) exist only here and are stripped before any path is
//! returned.

use std::collections::{HashMap, HashSet};

use crate::graph::{Edge, Graph, MutableDirectedGraph, MutableGraph, Vertex};
use crate::weight::weigher::EdgeWeigher;
use crate::weight::Weight;

/// A vertex of the working graph: the caller's vertex, or the shadow that
/// stands for "the same physical node reached a second time".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum TaggedVertex<V> {
    Real(V),
    Shadow(V),
}

/// What a working-graph edge stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum TaggedKind<E> {
    /// The caller's edge, unchanged
    Real(E),
    /// Reversed copy of a path edge, traversed to cancel it
    Residual(E),
    /// The caller's edge with an endpoint redirected to a shadow
    Proxy(E),
    /// Synthetic connector between a vertex and its shadow
    Bridge,
}

/// An edge of the working graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct TaggedEdge<V, E> {
    pub(crate) src: TaggedVertex<V>,
    pub(crate) dst: TaggedVertex<V>,
    pub(crate) kind: TaggedKind<E>,
}

impl<V: Vertex, E: Edge<V>> Edge<TaggedVertex<V>> for TaggedEdge<V, E> {
    fn src(&self) -> &TaggedVertex<V> {
        &self.src
    }

    fn dst(&self) -> &TaggedVertex<V> {
        &self.dst
    }
}

fn real_edge<V: Vertex, E: Edge<V>>(edge: &E) -> TaggedEdge<V, E> {
    TaggedEdge {
        src: TaggedVertex::Real(edge.src().clone()),
        dst: TaggedVertex::Real(edge.dst().clone()),
        kind: TaggedKind::Real(edge.clone()),
    }
}

/// Weigher for the working graph: a ban set and a per-edge override table
/// layered over the caller's weigher.
///
/// Banned edges answer the non-viable sentinel; overridden edges answer
/// their recorded weight; everything else falls through to the caller's
/// weigher (residuals negated, bridges free).
pub(crate) struct OverrideWeigher<'a, V, E, Wr>
where
    V: Vertex,
    E: Edge<V>,
    Wr: EdgeWeigher<V, E>,
{
    base: &'a Wr,
    overrides: HashMap<TaggedEdge<V, E>, Wr::W>,
    banned: HashSet<TaggedEdge<V, E>>,
}

impl<'a, V, E, Wr> EdgeWeigher<TaggedVertex<V>, TaggedEdge<V, E>> for OverrideWeigher<'a, V, E, Wr>
where
    V: Vertex,
    E: Edge<V>,
    Wr: EdgeWeigher<V, E>,
{
    type W = Wr::W;

    fn weight(&self, edge: &TaggedEdge<V, E>) -> Wr::W {
        if self.banned.contains(edge) {
            return self.base.non_viable_weight();
        }
        if let Some(weight) = self.overrides.get(edge) {
            return weight.clone();
        }
        match &edge.kind {
            TaggedKind::Real(original) | TaggedKind::Proxy(original) => {
                self.base.weight(original)
            }
            TaggedKind::Residual(original) => self
                .base
                .initial_weight()
                .subtract(&self.base.weight(original)),
            TaggedKind::Bridge => self.base.initial_weight(),
        }
    }

    fn initial_weight(&self) -> Wr::W {
        self.base.initial_weight()
    }

    fn non_viable_weight(&self) -> Wr::W {
        self.base.non_viable_weight()
    }
}

/// One iteration's working state: the tagged graph copy plus the weight
/// overlay, with the bookkeeping needed to keep both consistent while
/// previously finalized paths are folded in.
pub(crate) struct TransformState<'a, V, E, Wr>
where
    V: Vertex,
    E: Edge<V>,
    Wr: EdgeWeigher<V, E>,
{
    pub(crate) graph: MutableDirectedGraph<TaggedVertex<V>, TaggedEdge<V, E>>,
    pub(crate) weigher: OverrideWeigher<'a, V, E, Wr>,
    /// Originals that have been split, and their shadow
    split: HashMap<V, TaggedVertex<V>>,
    /// Vertices whose entry edge already carries the node penalty
    node_taxed: HashSet<V>,
    /// Current proxy standing in for a rerouted original edge
    replaced: HashMap<E, TaggedEdge<V, E>>,
}

impl<'a, V, E, Wr> TransformState<'a, V, E, Wr>
where
    V: Vertex,
    E: Edge<V>,
    Wr: EdgeWeigher<V, E>,
{
    /// Seeds the working state from the caller's graph and weigher
    pub(crate) fn new<G>(graph: &G, weigher: &'a Wr) -> Self
    where
        G: Graph<V, E> + ?Sized,
    {
        let mut work = MutableDirectedGraph::new();
        for vertex in graph.vertices() {
            work.add_vertex(TaggedVertex::Real(vertex.clone()));
        }
        for edge in graph.edges() {
            work.add_edge(real_edge(edge));
        }

        TransformState {
            graph: work,
            weigher: OverrideWeigher {
                base: weigher,
                overrides: HashMap::new(),
                banned: HashSet::new(),
            },
            split: HashMap::new(),
            node_taxed: HashSet::new(),
            replaced: HashMap::new(),
        }
    }

    /// Returns the working-graph edge currently standing for `edge`
    pub(crate) fn representative(&self, edge: &E) -> TaggedEdge<V, E> {
        self.replaced
            .get(edge)
            .cloned()
            .unwrap_or_else(|| real_edge(edge))
    }

    /// Returns true if the vertex has already been split
    pub(crate) fn is_split(&self, vertex: &V) -> bool {
        self.split.contains_key(vertex)
    }

    /// Creates the reversed residual of a path edge, then taxes the forward
    /// edge by the link penalty (cumulative across paths).
    ///
    /// The residual carries the negation of the caller's weight, never of
    /// the taxed working weight: a residual that refunded penalties would
    /// put negative cycles in the working graph.
    pub(crate) fn reverse_and_tax(&mut self, edge: &E, link_penalty: &Wr::W) {
        let forward = self.representative(edge);
        let weight = self.weigher.weight(&forward);

        let residual = TaggedEdge {
            src: forward.dst.clone(),
            dst: forward.src.clone(),
            kind: TaggedKind::Residual(edge.clone()),
        };
        let negated = self
            .weigher
            .base
            .initial_weight()
            .subtract(&self.weigher.base.weight(edge));
        self.weigher.overrides.insert(residual.clone(), negated);
        self.graph.add_edge(residual);

        self.weigher
            .overrides
            .insert(forward, weight.merge(link_penalty));
    }

    /// Raises the cost of the path's entry edge into `vertex` by the node
    /// penalty, once per vertex
    pub(crate) fn tax_node_entry(&mut self, vertex: &V, entry: &E, node_penalty: &Wr::W) {
        if !self.node_taxed.insert(vertex.clone()) {
            return;
        }
        let edge = self.representative(entry);
        let weight = self.weigher.weight(&edge);
        self.weigher.overrides.insert(edge, weight.merge(node_penalty));
    }

    /// Taxes every real link entering an already-split vertex (a common-node
    /// collision between two earlier paths)
    pub(crate) fn tax_all_incoming(&mut self, vertex: &V, node_penalty: &Wr::W) {
        let mut anchors = vec![TaggedVertex::Real(vertex.clone())];
        if let Some(shadow) = self.split.get(vertex) {
            anchors.push(shadow.clone());
        }

        for anchor in anchors {
            let incoming: Vec<TaggedEdge<V, E>> =
                self.graph.edges_to(&anchor).cloned().collect();
            for edge in incoming {
                if !matches!(&edge.kind, TaggedKind::Real(_) | TaggedKind::Proxy(_)) {
                    continue;
                }
                if self.weigher.banned.contains(&edge) {
                    continue;
                }
                let weight = self.weigher.weight(&edge);
                self.weigher
                    .overrides
                    .insert(edge, weight.merge(node_penalty));
            }
        }
    }

    /// Splits an interior path vertex: introduces its shadow, keeps the
    /// path's own continuation on the original, and reroutes every other
    /// real link (plus the just-processed entry edge) through the shadow so
    /// that reusing the physical node stays possible but taxed.
    pub(crate) fn split_vertex(
        &mut self,
        vertex: &V,
        entry: &E,
        continuation: &E,
        node_penalty: &Wr::W,
    ) {
        let original = TaggedVertex::Real(vertex.clone());
        let shadow = TaggedVertex::Shadow(vertex.clone());
        self.split.insert(vertex.clone(), shadow.clone());
        self.graph.add_vertex(shadow.clone());

        let zero = self.weigher.base.initial_weight();

        // Continuing out of the shadow is free
        let onward = TaggedEdge {
            src: shadow.clone(),
            dst: original.clone(),
            kind: TaggedKind::Bridge,
        };
        self.weigher.overrides.insert(onward.clone(), zero.clone());
        self.graph.add_edge(onward);

        // Passing through the physical node again costs the node penalty
        let back = TaggedEdge {
            src: original.clone(),
            dst: shadow.clone(),
            kind: TaggedKind::Bridge,
        };
        self.weigher
            .overrides
            .insert(back.clone(), zero.merge(node_penalty));
        self.graph.add_edge(back);

        // Every other outgoing real link now originates at the shadow
        let keep = self.representative(continuation);
        let outgoing: Vec<TaggedEdge<V, E>> =
            self.graph.edges_from(&original).cloned().collect();
        for edge in outgoing {
            if edge == keep {
                continue;
            }
            let wrapped = match &edge.kind {
                TaggedKind::Real(inner) | TaggedKind::Proxy(inner) => inner.clone(),
                TaggedKind::Residual(_) | TaggedKind::Bridge => continue,
            };
            if self.weigher.banned.contains(&edge) {
                continue;
            }
            let proxy = TaggedEdge {
                src: shadow.clone(),
                dst: edge.dst.clone(),
                kind: TaggedKind::Proxy(wrapped.clone()),
            };
            self.supersede(edge, wrapped, proxy);
        }

        // The just-processed entry edge now terminates at the shadow
        let entry_edge = self.representative(entry);
        let proxy = TaggedEdge {
            src: entry_edge.src.clone(),
            dst: shadow,
            kind: TaggedKind::Proxy(entry.clone()),
        };
        self.supersede(entry_edge, entry.clone(), proxy);
    }

    /// Re-enables an original edge whose proxy has been unwound from a raw
    /// search result
    pub(crate) fn unban(&mut self, edge: &E) {
        self.weigher.banned.remove(&real_edge(edge));
    }

    /// Replaces a working-graph edge with a proxy carrying its current
    /// weight. Real edges are banned in place (re-enabled during result
    /// cleaning); synthetic ones are removed outright.
    fn supersede(&mut self, old: TaggedEdge<V, E>, original: E, proxy: TaggedEdge<V, E>) {
        let weight = self.weigher.weight(&old);
        self.weigher.overrides.insert(proxy.clone(), weight);
        self.graph.add_edge(proxy.clone());

        if matches!(&old.kind, TaggedKind::Real(_)) {
            self.weigher.banned.insert(old);
        } else {
            self.graph.remove_edge(&old);
            self.weigher.overrides.remove(&old);
        }

        self.replaced.insert(original, proxy);
    }
}
