pub mod cost_heap;

pub use cost_heap::CostHeap;
