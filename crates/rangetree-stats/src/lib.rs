//! Latency profiling utilities backing the `profiler` feature of rangetree.
//!
//! A [Sketch] is a cheaply clonable handle onto a shared
//! [DDSketch](sketches_ddsketch::DDSketch); the [profile_scope] macro times
//! the enclosing scope and records the elapsed nanoseconds when the scope
//! ends.
#![deny(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::Arc;

use minstant::Instant;
use parking_lot::Mutex;
use sketches_ddsketch::{Config, DDSketch};

/// A latency sketch recording nanosecond durations.
///
/// Clones share the underlying sketch, so a measurement guard can outlive
/// the borrow it was created from.
#[derive(Clone)]
pub struct Sketch {
    inner: Arc<Mutex<DDSketch>>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(DDSketch::new(Config::defaults()))),
        }
    }
}

impl Sketch {
    /// Records a single duration in nanoseconds.
    #[inline]
    pub fn add(&self, nanos: f64) {
        self.inner.lock().add(nanos);
    }

    /// Starts a measurement that records into this sketch when dropped.
    #[inline]
    pub fn measure(&self) -> Measurement {
        Measurement {
            sketch: self.clone(),
            start: Instant::now(),
        }
    }

    /// Returns a snapshot of the recorded latency distribution.
    pub fn percentiles(&self) -> Percentiles {
        let sketch = self.inner.lock();
        let quantile = |q: f64| sketch.quantile(q).ok().flatten().unwrap_or(0.0);
        Percentiles {
            count: sketch.count(),
            p50: quantile(0.5),
            p95: quantile(0.95),
            p99: quantile(0.99),
            max: sketch.max().unwrap_or(0.0),
        }
    }
}

/// Percentile snapshot of a [Sketch], all latencies in nanoseconds
#[derive(Clone, Copy, Debug, Default)]
pub struct Percentiles {
    /// Number of recorded durations
    pub count: usize,
    /// Median latency
    pub p50: f64,
    /// 95th percentile latency
    pub p95: f64,
    /// 99th percentile latency
    pub p99: f64,
    /// Largest recorded latency
    pub max: f64,
}

/// A live measurement created by [Sketch::measure]; records its elapsed
/// time into the sketch on drop.
pub struct Measurement {
    sketch: Sketch,
    start: Instant,
}

impl Drop for Measurement {
    fn drop(&mut self) {
        self.sketch.add(self.start.elapsed().as_nanos() as f64);
    }
}

/// Measures the enclosing scope into the given sketch.
#[macro_export]
macro_rules! profile_scope {
    ($sketch:expr) => {
        let _measurement = $sketch.measure();
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_scoped_measurements() {
        let sketch = Sketch::default();
        for _ in 0..10 {
            profile_scope!(&sketch);
        }
        let percentiles = sketch.percentiles();
        assert_eq!(percentiles.count, 10);
        assert!(percentiles.max >= percentiles.p50);
    }

    #[test]
    fn empty_sketch_reports_zeroes() {
        let sketch = Sketch::default();
        let percentiles = sketch.percentiles();
        assert_eq!(percentiles.count, 0);
        assert_eq!(percentiles.p99, 0.0);
    }
}
