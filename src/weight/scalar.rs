use crate::weight::Weight;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::fmt;

/// Tolerance within which two scalar costs are considered tied.
///
/// Tied costs make both parent edges eligible during multi-path
/// reconstruction, so this threshold directly affects how many equal-cost
/// shortest paths a search reports.
pub const SAMENESS_THRESHOLD: f64 = 1e-9;

/// Floating-point cost with epsilon-tolerant comparison.
///
/// The non-viable sentinel is positive infinity; `compare` reports equality
/// for values within [`SAMENESS_THRESHOLD`] before falling back to total
/// numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarWeight {
    value: OrderedFloat<f64>,
}

impl ScalarWeight {
    /// Creates a weight with the given cost value
    pub fn new(value: f64) -> Self {
        ScalarWeight {
            value: OrderedFloat(value),
        }
    }

    /// The merge identity: the cost of a zero-length path
    pub fn zero() -> Self {
        ScalarWeight::new(0.0)
    }

    /// The sentinel marking an edge that must not be traversed
    pub fn non_viable() -> Self {
        ScalarWeight::new(f64::INFINITY)
    }

    /// Returns the raw cost value
    pub fn value(&self) -> f64 {
        self.value.0
    }
}

impl From<f64> for ScalarWeight {
    fn from(value: f64) -> Self {
        ScalarWeight::new(value)
    }
}

impl fmt::Display for ScalarWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.0)
    }
}

impl Weight for ScalarWeight {
    fn merge(&self, other: &Self) -> Self {
        ScalarWeight::new(self.value.0 + other.value.0)
    }

    fn subtract(&self, other: &Self) -> Self {
        ScalarWeight::new(self.value.0 - other.value.0)
    }

    fn compare(&self, other: &Self) -> Ordering {
        if (self.value.0 - other.value.0).abs() <= SAMENESS_THRESHOLD {
            Ordering::Equal
        } else {
            self.value.cmp(&other.value)
        }
    }

    fn is_viable(&self) -> bool {
        self.value.0.is_finite()
    }

    fn is_negative(&self) -> bool {
        self.value.0 < 0.0
    }
}
