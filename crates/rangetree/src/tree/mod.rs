use crate::{
    aggregate::Aggregate,
    span::{Span, into_span},
    update::Update,
};
use core::ops::RangeBounds;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

#[cfg(feature = "profiler")]
pub(crate) mod stats;

#[cfg(feature = "profiler")]
use rangetree_stats::profile_scope;
#[cfg(feature = "profiler")]
use stats::Stats;

/// A range aggregation/update tree with lazy propagation.
///
/// The tree partitions `[0, n - 1]` into a balanced binary hierarchy of
/// spans and keeps one [Aggregate] summary per span. Range updates applied
/// to a fully covered node are folded into the node's summary immediately
/// but only *recorded* for its descendants; the record is delivered the
/// first time a traversal actually needs to descend. Both queries and
/// updates therefore visit `O(log n)` nodes.
///
/// Every node's summary always reflects all updates issued against its span,
/// whether or not they have been physically delivered below it. A deferred
/// update is delivered to both children and cleared before any traversal
/// reads or writes below the node, and a single-slot node takes writes
/// directly and never defers.
///
/// Storage is a pair of implicit-heap arrays sized `4n + 1` (root at index
/// 1, children of `k` at `2k` and `2k + 1`); one extra level beyond
/// `ceil(log2 n)` can materialize when `n` is not a power of two, which the
/// `4n` bound absorbs.
///
/// Queries take `&mut self`: a read may deliver deferred updates downwards,
/// which changes the physical layout but never the logical content. The tree
/// holds no internal synchronization; share it across threads only behind
/// external exclusion.
///
/// # Example
///
/// ```
/// use rangetree::{RangeTree, WriteOp, aggregate::min_max::I64MinMaxAggregate};
///
/// let mut tree: RangeTree<I64MinMaxAggregate, WriteOp<i64>> =
///     RangeTree::from_slice(&[5, 3, 8, 1, 9]);
///
/// tree.update(1..=3, WriteOp::Assign(0));
/// let state = tree.query(..);
/// assert_eq!(state.min_value(), 0);
/// assert_eq!(state.max_value(), 9);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "A: Default"))]
#[derive(Clone, Debug)]
pub struct RangeTree<A: Aggregate, U: Update<A>> {
    /// Number of indexed slots
    len: usize,
    /// Per-node summaries, implicit-heap indexed
    summaries: Vec<A::Summary>,
    /// Per-node deferred updates, already folded into the node's own summary
    /// but not yet delivered to its children
    pending: Vec<Option<U>>,
    #[cfg(feature = "profiler")]
    #[cfg_attr(feature = "serde", serde(skip))]
    stats: Stats,
}

impl<A, U> RangeTree<A, U>
where
    A: Aggregate,
    U: Update<A>,
{
    const ROOT: usize = 1;

    /// Creates a tree over `n` slots, every summary at [Aggregate::IDENTITY].
    ///
    /// Callers must seed the tree with [RangeTree::build] before querying.
    /// `n` must be at least 1; this is debug-asserted only.
    pub fn with_len(n: usize) -> Self {
        debug_assert!(n >= 1, "a tree needs at least one slot");
        Self {
            len: n,
            summaries: vec![A::IDENTITY; 4 * n + 1],
            pending: vec![None; 4 * n + 1],
            #[cfg(feature = "profiler")]
            stats: Stats::default(),
        }
    }

    /// Creates a tree seeded from a slice of slot values.
    ///
    /// # Example
    ///
    /// ```
    /// use rangetree::{Noop, RangeTree, aggregate::min_max::I64MinMaxAggregate};
    ///
    /// let mut tree: RangeTree<I64MinMaxAggregate, Noop> =
    ///     RangeTree::from_slice(&[4, -1, 7]);
    /// assert_eq!(tree.query(..).min_value(), -1);
    /// ```
    pub fn from_slice<I: AsRef<[A::Value]>>(values: I) -> Self {
        let values = values.as_ref();
        let mut tree = Self::with_len(values.len());
        tree.build(values);
        tree
    }

    /// Seeds the tree bottom-up from one value per slot.
    ///
    /// Leaves are lifted via [Aggregate::lift] and internal summaries are
    /// the [Aggregate::join] of their children, in O(n). This is one-time
    /// seeding: re-seeding a tree that has since been updated is not
    /// guarded against.
    pub fn build(&mut self, values: &[A::Value]) {
        debug_assert_eq!(values.len(), self.len, "one value per slot");
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.build);

        self.build_rec(Self::ROOT, self.root_span(), values);
    }

    /// Returns the combined summary over the given slot range.
    ///
    /// Slots outside `[0, len - 1]`, as well as empty or inverted ranges,
    /// contribute [Aggregate::IDENTITY] silently.
    ///
    /// Takes `&mut self` because the traversal may deliver deferred updates
    /// downwards; the logical content never changes, and repeated identical
    /// queries return equal results.
    #[inline]
    pub fn query<R>(&mut self, range: R) -> A::Summary
    where
        R: RangeBounds<usize>,
    {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.query);

        match into_span(&range, self.len) {
            Some(target) => self.query_rec(Self::ROOT, self.root_span(), target),
            None => A::IDENTITY,
        }
    }

    /// Applies `op` to every slot in the given range.
    ///
    /// Fully covered nodes fold the op into their summary immediately and
    /// defer delivery to their children; an op reaching a single-slot node
    /// is applied directly. Empty, inverted, and out-of-range slots are
    /// skipped silently.
    ///
    /// # Example
    ///
    /// ```
    /// use rangetree::{RangeTree, WriteOp, aggregate::sum::I64SumAggregate};
    ///
    /// let mut tree: RangeTree<I64SumAggregate, WriteOp<i64>> =
    ///     RangeTree::from_slice(&[1, 2, 3, 4]);
    /// tree.update(.., WriteOp::Add(5));
    /// assert_eq!(tree.query(..), 30);
    /// ```
    #[inline]
    pub fn update<R>(&mut self, range: R, op: U)
    where
        R: RangeBounds<usize>,
    {
        #[cfg(feature = "profiler")]
        profile_scope!(&self.stats.update);

        if let Some(target) = into_span(&range, self.len) {
            self.update_rec(Self::ROOT, self.root_span(), target, &op);
        }
    }

    /// Returns the number of slots the tree indexes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree indexes no slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the operation latency stats of the tree
    #[cfg(feature = "profiler")]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[inline]
    fn root_span(&self) -> Span {
        Span::new(0, self.len - 1)
    }

    #[inline]
    fn left(node: usize) -> usize {
        2 * node
    }

    #[inline]
    fn right(node: usize) -> usize {
        2 * node + 1
    }

    fn build_rec(&mut self, node: usize, span: Span, values: &[A::Value]) {
        if span.is_unit() {
            self.summaries[node] = A::lift(span.start(), values[span.start()]);
            return;
        }
        let (left, right) = span.split();
        self.build_rec(Self::left(node), left, values);
        self.build_rec(Self::right(node), right, values);
        self.summaries[node] = A::join(
            self.summaries[Self::left(node)],
            self.summaries[Self::right(node)],
        );
    }

    /// Applies `op` to a node whose span the update fully covers.
    #[inline]
    fn absorb(&mut self, node: usize, span: Span, op: &U) {
        self.summaries[node] = op.apply(self.summaries[node], span);
        // a single-slot node has no children to deliver to and takes the
        // write directly
        if !span.is_unit() {
            self.pending[node] = Some(match self.pending[node].take() {
                Some(earlier) => earlier.merge(op.clone(), span),
                None => op.clone(),
            });
        }
    }

    /// Delivers a node's deferred update to both children and clears it.
    ///
    /// Must run before any read of a child summary or descent into a child.
    fn flush(&mut self, node: usize, span: Span) {
        if let Some(op) = self.pending[node].take() {
            let (left, right) = span.split();
            self.absorb(Self::left(node), left, &op);
            self.absorb(Self::right(node), right, &op);
        }
    }

    fn query_rec(&mut self, node: usize, span: Span, target: Span) -> A::Summary {
        if span.disjoint(target) {
            return A::IDENTITY;
        }
        if span.within(target) {
            return self.summaries[node];
        }
        self.flush(node, span);
        let (left, right) = span.split();
        A::join(
            self.query_rec(Self::left(node), left, target),
            self.query_rec(Self::right(node), right, target),
        )
    }

    fn update_rec(&mut self, node: usize, span: Span, target: Span, op: &U) {
        if span.disjoint(target) {
            return;
        }
        if span.within(target) {
            self.absorb(node, span, op);
            return;
        }
        self.flush(node, span);
        let (left, right) = span.split();
        if target.start() <= left.end() {
            self.update_rec(Self::left(node), left, target, op);
        }
        if target.end() >= right.start() {
            self.update_rec(Self::right(node), right, target, op);
        }
        self.summaries[node] = A::join(
            self.summaries[Self::left(node)],
            self.summaries[Self::right(node)],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::Noop;

    /// Keeps the leftmost slot value of a range. `join` is associative but
    /// not commutative, so it pins the left-before-right traversal order.
    #[derive(Default, Debug, Clone)]
    struct Leftmost;

    impl Aggregate for Leftmost {
        const IDENTITY: Self::Summary = None;
        type Value = i64;
        type Summary = Option<i64>;

        fn lift(_index: usize, value: i64) -> Option<i64> {
            Some(value)
        }

        fn join(a: Option<i64>, b: Option<i64>) -> Option<i64> {
            a.or(b)
        }
    }

    #[test]
    fn join_order_is_left_to_right() {
        let mut tree: RangeTree<Leftmost, Noop> = RangeTree::from_slice(&[7, 3, 9, 2, 4]);
        assert_eq!(tree.query(..), Some(7));
        assert_eq!(tree.query(1..=3), Some(3));
        assert_eq!(tree.query(2..), Some(9));
        assert_eq!(tree.query(4..=4), Some(4));
    }

    #[cfg(feature = "min_max")]
    mod min_max {
        use super::*;
        use crate::{WriteOp, aggregate::min_max::I64MinMaxAggregate};

        type MinMaxTree = RangeTree<I64MinMaxAggregate, WriteOp<i64>>;

        fn min_max(tree: &mut MinMaxTree, range: core::ops::RangeInclusive<usize>) -> (i64, i64) {
            let state = tree.query(range);
            (state.min_value(), state.max_value())
        }

        #[test]
        fn interleaved_writes_and_reads() {
            let mut tree = MinMaxTree::from_slice(&[5, 3, 8, 1, 9]);
            assert_eq!(min_max(&mut tree, 0..=4), (1, 9));

            tree.update(1..=3, WriteOp::Assign(0));
            assert_eq!(min_max(&mut tree, 0..=4), (0, 9));

            tree.update(0..=4, WriteOp::Add(2));
            assert_eq!(min_max(&mut tree, 0..=4), (2, 11));
            assert_eq!(min_max(&mut tree, 1..=1), (2, 2));
        }

        #[test]
        fn write_order_matters() {
            let mut tree = MinMaxTree::from_slice(&[0]);
            tree.update(0..=0, WriteOp::Assign(5));
            tree.update(0..=0, WriteOp::Add(2));
            assert_eq!(min_max(&mut tree, 0..=0), (7, 7));

            let mut tree = MinMaxTree::from_slice(&[0]);
            tree.update(0..=0, WriteOp::Add(2));
            tree.update(0..=0, WriteOp::Assign(5));
            assert_eq!(min_max(&mut tree, 0..=0), (5, 5));
        }

        #[test]
        fn deferred_write_reaches_sub_ranges() {
            let mut tree = MinMaxTree::from_slice(&[0, 1, 2, 3, 4, 5, 6, 7]);
            // fully covers the root: nothing is delivered below it yet
            tree.update(0..=7, WriteOp::Add(10));
            assert_eq!(min_max(&mut tree, 3..=3), (13, 13));

            tree.update(2..=5, WriteOp::Assign(1));
            assert_eq!(min_max(&mut tree, 4..=4), (1, 1));
            assert_eq!(min_max(&mut tree, 0..=7), (1, 17));
        }

        #[test]
        fn deferred_writes_compose_unseen() {
            let mut tree = MinMaxTree::from_slice(&[0, 0, 0, 0]);
            // both writes land on covered nodes with no read in between,
            // so the second must fold into the first's pending record
            tree.update(0..=3, WriteOp::Assign(5));
            tree.update(0..=3, WriteOp::Add(2));
            assert_eq!(min_max(&mut tree, 1..=2), (7, 7));

            let mut tree = MinMaxTree::from_slice(&[0, 0, 0, 0]);
            tree.update(0..=3, WriteOp::Add(1));
            tree.update(0..=3, WriteOp::Add(1));
            assert_eq!(min_max(&mut tree, 2..=2), (2, 2));
        }

        #[test]
        fn repeated_reads_are_stable() {
            let mut tree = MinMaxTree::from_slice(&[4, -2, 9, 0, 3, -7]);
            tree.update(1..=4, WriteOp::Add(3));
            let first = min_max(&mut tree, 0..=5);
            let second = min_max(&mut tree, 0..=5);
            assert_eq!(first, second);
            assert_eq!(first, (-7, 12));
        }

        #[test]
        fn out_of_range_reads_contribute_nothing() {
            let mut tree = MinMaxTree::from_slice(&[5, 3, 8, 1, 9]);
            let state = tree.query(10..=20);
            assert_eq!(state.min_value(), i64::MAX);
            assert_eq!(state.max_value(), i64::MIN);

            let state = tree.query(3..3);
            assert_eq!(state.min_value(), i64::MAX);

            #[allow(clippy::reversed_empty_ranges)]
            let state = tree.query(4..=2);
            assert_eq!(state.max_value(), i64::MIN);

            // writes to nothing change nothing
            tree.update(9..9, WriteOp::Assign(-100));
            assert_eq!(min_max(&mut tree, 0..=4), (1, 9));
        }

        #[test]
        fn reads_clipped_by_slot_count() {
            let mut tree = MinMaxTree::from_slice(&[5, 3, 8]);
            // slots beyond the last contribute identity, not garbage
            assert_eq!(min_max(&mut tree, 2..=9), (8, 8));
        }

        #[test]
        fn single_slot_tree() {
            let mut tree = MinMaxTree::from_slice(&[42]);
            assert_eq!(min_max(&mut tree, 0..=0), (42, 42));
            tree.update(0..=0, WriteOp::Add(1));
            assert_eq!(min_max(&mut tree, 0..=0), (43, 43));
        }

        #[test]
        fn with_len_then_build_matches_from_slice() {
            let values = [3, 1, 4, 1, 5, 9, 2, 6];
            let mut seeded = MinMaxTree::with_len(values.len());
            seeded.build(&values);
            let mut direct = MinMaxTree::from_slice(&values);
            assert_eq!(seeded.len(), direct.len());
            for i in 0..values.len() {
                assert_eq!(min_max(&mut seeded, i..=i), min_max(&mut direct, i..=i));
            }
        }
    }

    #[cfg(feature = "sum")]
    mod sum {
        use super::*;
        use crate::{WriteOp, aggregate::sum::I64SumAggregate};

        type SumTree = RangeTree<I64SumAggregate, WriteOp<i64>>;

        #[test]
        fn add_scales_with_covered_slots() {
            let mut tree = SumTree::from_slice(&[1, 2, 3, 4]);
            assert_eq!(tree.query(..), 10);

            tree.update(.., WriteOp::Add(5));
            assert_eq!(tree.query(..), 30);
            assert_eq!(tree.query(0..=0), 6);
        }

        #[test]
        fn assign_then_read_sub_ranges() {
            let mut tree = SumTree::from_slice(&[1, 2, 3, 4]);
            tree.update(.., WriteOp::Add(5));
            tree.update(1..=2, WriteOp::Assign(0));
            assert_eq!(tree.query(..), 15);
            assert_eq!(tree.query(1..=2), 0);
            assert_eq!(tree.query(0..=0), 6);
            assert_eq!(tree.query(3..=3), 9);
        }
    }
}
