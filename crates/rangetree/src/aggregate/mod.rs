use core::fmt::Debug;

/// Incremental (MIN, MAX) pair aggregation
#[cfg(feature = "min_max")]
pub mod min_max;
/// Incremental SUM aggregation
#[cfg(feature = "sum")]
pub mod sum;

/// Aggregation interface that library users implement to parameterize a
/// [RangeTree](crate::RangeTree)
///
/// An implementation describes how a single slot is lifted into a range
/// summary and how the summaries of two adjacent sub-ranges combine. The
/// crate ships implementations for common cases:
/// - [min_max]
/// - [sum]
///
/// # Contract
///
/// `join` must be associative, and `IDENTITY` must be its neutral element.
/// `join` is **not** assumed commutative: the engine always passes the left
/// sub-range's summary as `a` and the right sub-range's as `b`, so summaries
/// that depend on slot order (first element, longest run) remain well
/// defined. Neither property is checked at runtime; they are the
/// implementor's obligation and belong in the implementation's tests.
///
/// # Example
///
/// Here is a simple example showing how to create a SUM aggregate using u32.
///
/// ```
/// use rangetree::Aggregate;
///
/// #[derive(Default, Debug, Clone)]
/// struct MySumAggregate;
///
/// impl Aggregate for MySumAggregate {
///     const IDENTITY: Self::Summary = 0u32;
///     type Value = u32;
///     type Summary = u32;
///
///     fn lift(_index: usize, value: Self::Value) -> Self::Summary {
///         value
///     }
///
///     fn join(a: Self::Summary, b: Self::Summary) -> Self::Summary {
///         a + b
///     }
/// }
/// ```
pub trait Aggregate: Default + Debug + Clone + 'static {
    /// Identity value for [Self::Summary].
    ///
    /// Queries return it for every index range that contributes nothing, so
    /// for SUM types the identity should be set to 0.
    const IDENTITY: Self::Summary;

    /// Per-slot input type lifted into a [Self::Summary] when the tree is
    /// built.
    type Value: ValueBounds;

    /// Summary type maintained for every node's range.
    type Summary: SummaryType;

    /// Lifts a single slot into the summary of its one-element range.
    fn lift(index: usize, value: Self::Value) -> Self::Summary;

    /// Combines the summaries of two adjacent ranges, `a` covering the
    /// slots directly left of `b`.
    fn join(a: Self::Summary, b: Self::Summary) -> Self::Summary;
}

/// Bounds for per-slot input values
pub trait ValueBounds: Debug + Clone + Copy + Send {}
impl<T> ValueBounds for T where T: Debug + Clone + Copy + Send {}

/// Trait bounds for a summary type
#[cfg(not(feature = "serde"))]
pub trait SummaryBounds: Default + Debug + Clone + Copy + Send {}

/// Trait bounds for a summary type
#[cfg(feature = "serde")]
pub trait SummaryBounds:
    Default + Debug + Clone + Copy + Send + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

#[cfg(not(feature = "serde"))]
impl<T> SummaryBounds for T where T: Default + Debug + Clone + Copy + Send {}

#[cfg(feature = "serde")]
impl<T> SummaryBounds for T where
    T: Default + Debug + Clone + Copy + Send + serde::Serialize + for<'a> serde::Deserialize<'a>
{
}

/// A node summary type
pub trait SummaryType: SummaryBounds {}

macro_rules! primitive_summary {
    ($type:ty) => {
        impl SummaryType for $type {}
    };
}

primitive_summary!(u8);
primitive_summary!(u16);
primitive_summary!(u32);
primitive_summary!(u64);
primitive_summary!(i8);
primitive_summary!(i16);
primitive_summary!(i32);
primitive_summary!(i64);
primitive_summary!(f32);
primitive_summary!(f64);
primitive_summary!(i128);
primitive_summary!(u128);

impl<T: SummaryType> SummaryType for Option<T> {}

macro_rules! tuple_summary {
    ( $( $name:ident )+ ) => {
        impl<$($name: SummaryType),+> SummaryType for ($($name,)+)
        {
        }
    };
}

tuple_summary!(A B);
tuple_summary!(A B C);
tuple_summary!(A B C D);
tuple_summary!(A B C D E);
tuple_summary!(A B C D E F);
