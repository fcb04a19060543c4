#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rangetree::{RangeTree, WriteOp, aggregate::min_max::I64MinMaxAggregate};

#[derive(Debug, Arbitrary)]
enum Op {
    Assign(usize, usize, i32),
    Add(usize, usize, i32),
    Read(usize, usize),
}

fuzz_target!(|input: (Vec<i32>, Vec<Op>)| {
    let (values, ops) = input;
    if values.is_empty() {
        return;
    }
    let len = values.len();
    let values: Vec<i64> = values.into_iter().map(i64::from).collect();

    let mut tree: RangeTree<I64MinMaxAggregate, WriteOp<i64>> =
        RangeTree::from_slice(&values);
    let mut oracle = values;

    for op in ops {
        match op {
            Op::Assign(a, b, value) => {
                let (lo, hi) = ordered(a % len, b % len);
                tree.update(lo..=hi, WriteOp::Assign(value.into()));
                for slot in &mut oracle[lo..=hi] {
                    *slot = value.into();
                }
            }
            Op::Add(a, b, amount) => {
                let (lo, hi) = ordered(a % len, b % len);
                tree.update(lo..=hi, WriteOp::Add(amount.into()));
                for slot in &mut oracle[lo..=hi] {
                    *slot += i64::from(amount);
                }
            }
            Op::Read(a, b) => {
                let (lo, hi) = ordered(a % len, b % len);
                let state = tree.query(lo..=hi);
                assert_eq!(state.min_value(), *oracle[lo..=hi].iter().min().unwrap());
                assert_eq!(state.max_value(), *oracle[lo..=hi].iter().max().unwrap());
            }
        }
    }
});

fn ordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}
