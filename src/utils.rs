use std::time::{Duration, Instant};

/// Logs the time spent since `prev` under `l_step` and returns the new total.
pub(crate) fn trace(l_type: &str, l_step: &str, start: Instant, prev: Duration) -> Duration {
    let elapsed = start.elapsed();
    log::trace!("{} | Total={:.2?} | {}={:.2?}", l_type, elapsed, l_step, elapsed - prev);
    elapsed
}
