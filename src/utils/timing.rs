//! Random duration sampling for render waits and politeness delays

use rand::Rng;
use std::time::Duration;

/// Sample a duration uniformly from `[min, max]`
///
/// Returns `min` when the range is empty or inverted.
#[must_use]
pub fn sample_between(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let secs = rand::rng().random_range(min.as_secs_f64()..=max.as_secs_f64());
    Duration::from_secs_f64(secs)
}
