use crate::{
    aggregate::Aggregate,
    span::Span,
    update::{Update, WriteOp},
};

macro_rules! sum_impl {
    ($struct:tt, $type:ty) => {
        #[derive(Default, Debug, Clone, Copy)]
        #[allow(missing_docs)]
        pub struct $struct;

        impl Aggregate for $struct {
            const IDENTITY: Self::Summary = 0 as $type;

            type Value = $type;
            type Summary = $type;

            fn lift(_index: usize, value: Self::Value) -> Self::Summary {
                value
            }

            #[inline]
            fn join(a: Self::Summary, b: Self::Summary) -> Self::Summary {
                a + b
            }
        }

        // A sum moves with the number of covered slots, so both write
        // variants scale by the span length.
        impl Update<$struct> for WriteOp<$type> {
            #[inline]
            fn apply(&self, summary: $type, span: Span) -> $type {
                match *self {
                    WriteOp::Assign(value) => value * (span.len() as $type),
                    WriteOp::Add(amount) => summary + amount * (span.len() as $type),
                }
            }

            fn merge(self, later: Self, _span: Span) -> Self {
                self.merge_with(later)
            }
        }
    };
}

sum_impl!(U32SumAggregate, u32);
sum_impl!(U64SumAggregate, u64);
sum_impl!(I32SumAggregate, i32);
sum_impl!(I64SumAggregate, i64);
sum_impl!(F32SumAggregate, f32);
sum_impl!(F64SumAggregate, f64);
