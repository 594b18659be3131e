use crate::graph::{Edge, Vertex};
use crate::weight::scalar::ScalarWeight;
use crate::weight::Weight;

/// Pluggable per-edge cost function.
///
/// A weigher is a pure function from edge to weight, plus the two sentinels
/// the algorithms need: the merge identity (cost of a zero-length path) and
/// the non-viable marker (do not traverse this edge).
pub trait EdgeWeigher<V, E>
where
    V: Vertex,
    E: Edge<V>,
{
    type W: Weight;

    /// Returns the weight of the given edge
    fn weight(&self, edge: &E) -> Self::W;

    /// Returns the weight of a zero-length path, the merge identity
    fn initial_weight(&self) -> Self::W;

    /// Returns the sentinel marking an edge that must not be used
    fn non_viable_weight(&self) -> Self::W;
}

/// Uniform weigher charging one unit per edge, the default when a caller
/// only cares about hop count.
#[derive(Debug, Default, Clone, Copy)]
pub struct HopCountWeigher;

impl HopCountWeigher {
    pub fn new() -> Self {
        HopCountWeigher
    }
}

impl<V, E> EdgeWeigher<V, E> for HopCountWeigher
where
    V: Vertex,
    E: Edge<V>,
{
    type W = ScalarWeight;

    fn weight(&self, _edge: &E) -> ScalarWeight {
        ScalarWeight::new(1.0)
    }

    fn initial_weight(&self) -> ScalarWeight {
        ScalarWeight::zero()
    }

    fn non_viable_weight(&self) -> ScalarWeight {
        ScalarWeight::non_viable()
    }
}
