use crate::{
    aggregate::{Aggregate, SummaryType},
    span::Span,
    update::{Update, WriteOp},
};

#[inline]
fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

#[inline]
fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

/// MinMax summary state
#[derive(Default, Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MinMaxState<T: PartialOrd + Copy> {
    min: T,
    max: T,
}
impl<T: PartialOrd + Copy> MinMaxState<T> {
    #[inline]
    fn merge(&mut self, other: Self) {
        self.min = min(self.min, other.min);
        self.max = max(self.max, other.max);
    }
    /// Returns the minimum value over the summarized range
    pub fn min_value(&self) -> T {
        self.min
    }
    /// Returns the maximum value over the summarized range
    pub fn max_value(&self) -> T {
        self.max
    }
}

macro_rules! min_max_summary_impl {
    ($type:ty) => {
        impl SummaryType for MinMaxState<$type> {}
    };
}

min_max_summary_impl!(u8);
min_max_summary_impl!(u16);
min_max_summary_impl!(u32);
min_max_summary_impl!(u64);
min_max_summary_impl!(i8);
min_max_summary_impl!(i16);
min_max_summary_impl!(i32);
min_max_summary_impl!(i64);
min_max_summary_impl!(f32);
min_max_summary_impl!(f64);

macro_rules! min_max_impl {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Aggregate for $struct {
            const IDENTITY: Self::Summary = MinMaxState {
                min: <$type>::MAX,
                max: <$type>::MIN,
            };

            type Value = $type;
            type Summary = MinMaxState<$type>;

            fn lift(_index: usize, value: Self::Value) -> Self::Summary {
                Self::Summary {
                    min: value,
                    max: value,
                }
            }

            #[inline]
            fn join(mut a: Self::Summary, b: Self::Summary) -> Self::Summary {
                a.merge(b);
                a
            }
        }

        // Assign pins both ends of the state, Add shifts them uniformly:
        // neither effect depends on how many slots the node covers.
        impl Update<$struct> for WriteOp<$type> {
            #[inline]
            fn apply(&self, summary: MinMaxState<$type>, _span: Span) -> MinMaxState<$type> {
                match *self {
                    WriteOp::Assign(value) => MinMaxState {
                        min: value,
                        max: value,
                    },
                    WriteOp::Add(amount) => MinMaxState {
                        min: summary.min + amount,
                        max: summary.max + amount,
                    },
                }
            }

            fn merge(self, later: Self, _span: Span) -> Self {
                self.merge_with(later)
            }
        }
    };
}

min_max_impl!(U16MinMaxAggregate, u16);
min_max_impl!(U32MinMaxAggregate, u32);
min_max_impl!(U64MinMaxAggregate, u64);
min_max_impl!(I8MinMaxAggregate, i8);
min_max_impl!(I16MinMaxAggregate, i16);
min_max_impl!(I32MinMaxAggregate, i32);
min_max_impl!(I64MinMaxAggregate, i64);
min_max_impl!(F32MinMaxAggregate, f32);
min_max_impl!(F64MinMaxAggregate, f64);
