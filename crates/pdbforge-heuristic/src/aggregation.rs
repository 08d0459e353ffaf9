//! Aggregation of heuristic values over sampled worlds.

use pdbforge_config::AggregationMethod;
use pdbforge_core::HeuristicValue;

/// Combines per-world values with `method`.
///
/// An empty sample aggregates to 0. An infinite value makes every
/// method return infinity.
///
/// # Example
///
/// ```
/// use pdbforge_config::AggregationMethod;
/// use pdbforge_heuristic::aggregate;
///
/// let values = [1.0, 2.0, 3.0, 6.0];
/// assert_eq!(aggregate(AggregationMethod::Add, values), 12.0);
/// assert_eq!(aggregate(AggregationMethod::Average, values), 3.0);
/// assert_eq!(aggregate(AggregationMethod::Max, values), 6.0);
/// ```
pub fn aggregate(
    method: AggregationMethod,
    values: impl IntoIterator<Item = HeuristicValue>,
) -> HeuristicValue {
    let values = values.into_iter();
    match method {
        AggregationMethod::Add => values.sum(),
        AggregationMethod::Average => {
            let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
            if count == 0 {
                0.0
            } else {
                sum / count as HeuristicValue
            }
        }
        AggregationMethod::Max => values.fold(0.0, HeuristicValue::max),
    }
}
