//! rangetree is a generic range aggregation/update tree with lazy propagation
//!
//! The tree maintains a summary per contiguous index range and defers range
//! updates on ancestor nodes until a traversal actually needs the content of
//! their sub-ranges. Users plug in their own aggregation and update semantics
//! through the [Aggregate] and [Update] capability traits.
//!
//! # Example
//!
//! ```
//! use rangetree::{RangeTree, WriteOp, aggregate::min_max::I64MinMaxAggregate};
//!
//! let mut tree: RangeTree<I64MinMaxAggregate, WriteOp<i64>> =
//!     RangeTree::from_slice(&[5, 3, 8, 1, 9]);
//!
//! // assign 0 across [1, 3], then shift everything up by 2
//! tree.update(1..=3, WriteOp::Assign(0));
//! tree.update(.., WriteOp::Add(2));
//!
//! let state = tree.query(..);
//! assert_eq!(state.min_value(), 2);
//! assert_eq!(state.max_value(), 11);
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Aggregation capability and the aggregates shipped with the crate.
pub mod aggregate;
/// Range update capability and the updates shipped with the crate.
pub mod update;

mod span;
mod tree;

pub use aggregate::Aggregate;
pub use span::Span;
pub use tree::RangeTree;
pub use update::{Noop, Update, WriteOp};

#[cfg(feature = "profiler")]
pub use tree::stats::Stats;
