use crate::{aggregate::Aggregate, span::Span};
use core::fmt::Debug;
use core::ops::Add;

/// Range update interface that library users implement to parameterize a
/// [RangeTree](crate::RangeTree)
///
/// An update describes a mutation of every slot in a range. The engine never
/// walks the slots themselves: it asks the update to rewrite whole-node
/// summaries via [Update::apply] and composes deferred updates via
/// [Update::merge].
///
/// # Contract
///
/// `old.merge(later, span)` must be equivalent to applying `old` first and
/// `later` second across `span`. Composition is **not** commutative
/// (assigning 5 and then adding 2 is not adding 2 and then assigning 5), and
/// the engine always folds the newer update in as `later`. Like the
/// [Aggregate] contract this is enforced by the implementor's tests, not at
/// runtime.
pub trait Update<A: Aggregate>: UpdateBounds {
    /// Rewrites `summary` as if the update had been applied to every slot in
    /// `span`.
    ///
    /// The span is passed because some updates scale with range length:
    /// adding `k` to every slot moves a sum summary by `k * span.len()` but
    /// a min/max summary by `k` uniformly.
    fn apply(&self, summary: A::Summary, span: Span) -> A::Summary;

    /// Returns the update equivalent to applying `self` and then `later`
    /// across `span`.
    #[must_use]
    fn merge(self, later: Self, span: Span) -> Self;
}

/// Bounds for an update type
#[cfg(not(feature = "serde"))]
pub trait UpdateBounds: Debug + Clone {}

/// Bounds for an update type
#[cfg(feature = "serde")]
pub trait UpdateBounds:
    Debug + Clone + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

#[cfg(not(feature = "serde"))]
impl<T> UpdateBounds for T where T: Debug + Clone {}

#[cfg(feature = "serde")]
impl<T> UpdateBounds for T where
    T: Debug + Clone + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

/// A write over a range of numeric slots: overwrite them all or shift them
/// all by a constant.
///
/// How a `WriteOp` rewrites a summary depends on the aggregate family, so the
/// [Update] implementations live with the aggregates (see
/// [min_max](crate::aggregate::min_max) and [sum](crate::aggregate::sum)).
/// Composition does not: a later [WriteOp::Assign] makes everything before it
/// irrelevant, and consecutive adds sum, regardless of what is being
/// summarized.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOp<T> {
    /// Set every slot in the range to the value.
    Assign(T),
    /// Add the value to every slot in the range.
    Add(T),
}

impl<T: Add<Output = T>> WriteOp<T> {
    /// Composes `self`-then-`later` into a single op.
    #[inline]
    pub(crate) fn merge_with(self, later: Self) -> Self {
        match (self, later) {
            // a later assign wipes whatever came before it
            (_, WriteOp::Assign(v)) => WriteOp::Assign(v),
            (WriteOp::Assign(a), WriteOp::Add(b)) => WriteOp::Assign(a + b),
            (WriteOp::Add(a), WriteOp::Add(b)) => WriteOp::Add(a + b),
        }
    }
}

/// An update that leaves every summary untouched.
///
/// The update slot of a tree that is only ever queried:
/// `RangeTree<A, Noop>`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Noop;

impl<A: Aggregate> Update<A> for Noop {
    #[inline]
    fn apply(&self, summary: A::Summary, _span: Span) -> A::Summary {
        summary
    }

    fn merge(self, _later: Self, _span: Span) -> Self {
        self
    }
}
