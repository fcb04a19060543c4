use core::fmt;
use rangetree_stats::Sketch;

/// Operation latency stats for a [RangeTree](crate::RangeTree)
#[derive(Clone, Default)]
pub struct Stats {
    /// A sketch for recording latencies of seeding the tree
    pub build: Sketch,
    /// A sketch for recording latencies of range queries
    pub query: Sketch,
    /// A sketch for recording latencies of range updates
    pub update: Sketch,
}

impl core::fmt::Debug for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RangeTree Stats")
            .field("build", &self.build.percentiles())
            .field("query", &self.query.percentiles())
            .field("update", &self.update.percentiles())
            .finish()
    }
}
