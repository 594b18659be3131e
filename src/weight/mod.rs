pub mod scalar;
pub mod weigher;

pub use scalar::ScalarWeight;
pub use weigher::{EdgeWeigher, HopCountWeigher};

use num_traits::Float;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::fmt::Debug;

/// Abstract cost value used by the search algorithms.
///
/// A weight is ordered, mergeable (sum for scalar costs) and subtractable.
/// `compare` is the ordering the algorithms rely on: implementations may
/// treat nearly-equal values as tied, which controls how many equal-cost
/// parent edges are retained per vertex during relaxation.
pub trait Weight: Clone + Debug {
    /// Combines two weights into the weight of the concatenated path
    fn merge(&self, other: &Self) -> Self;

    /// Removes `other` from this weight (inverse of `merge`)
    fn subtract(&self, other: &Self) -> Self;

    /// Orders two weights, reporting ties where the implementation
    /// considers them equivalent
    fn compare(&self, other: &Self) -> Ordering;

    /// Returns false if this weight marks an untraversable edge
    fn is_viable(&self) -> bool;

    /// Returns true if this weight is negative
    fn is_negative(&self) -> bool;
}

/// Exact-comparison weights over any ordered float, for callers that do not
/// want tie tolerance.
impl<T> Weight for OrderedFloat<T>
where
    T: Float + Debug,
{
    fn merge(&self, other: &Self) -> Self {
        OrderedFloat(self.0 + other.0)
    }

    fn subtract(&self, other: &Self) -> Self {
        OrderedFloat(self.0 - other.0)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn is_viable(&self) -> bool {
        self.0.is_finite()
    }

    fn is_negative(&self) -> bool {
        self.0 < T::zero()
    }
}
