//! Label aggregation.

use tubemood_models::{AggregateStats, ClassificationResult};

use crate::metrics;

/// Tally labels in a single pass. Unclassified entries count toward `total` only.
pub fn aggregate(results: &[ClassificationResult]) -> AggregateStats {
    results.iter().fold(AggregateStats::default(), |mut stats, result| {
        metrics::record_classification(result.label);
        stats.record(result.label);
        stats
    })
}
