//! Parallel in-place sorts.
//!
//! - [`BubbleSort`]: data-parallel repeated passes (odd-even by default)
//! - [`MergeSort`]: fork-join divide and conquer with a sequential merge

pub mod bubble;
pub mod merge;

pub use bubble::{odd_even_sort, BubbleSort};
pub use merge::MergeSort;
