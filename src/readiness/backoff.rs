//! Spacing between worker port probes.

use std::time::Duration;

use rand::Rng;

use crate::config::ReadinessConfig;

/// Sleep before the next probe, after `failed` probes have been refused.
///
/// Doubles from `poll_interval_ms` up to `poll_max_interval_ms`, adds up to
/// a tenth of that as jitter, and never sleeps past `remaining`.
pub fn probe_delay(failed: u32, config: &ReadinessConfig, remaining: Duration) -> Duration {
    if failed == 0 || remaining.is_zero() {
        return Duration::ZERO;
    }

    let doublings = (failed - 1).min(63);
    let step_ms = config
        .poll_interval_ms
        .checked_shl(doublings)
        .filter(|ms| ms >> doublings == config.poll_interval_ms)
        .unwrap_or(u64::MAX)
        .min(config.poll_max_interval_ms.max(config.poll_interval_ms));

    let spread_ms = step_ms / 10;
    let jitter_ms = if spread_ms == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..=spread_ms)
    };

    Duration::from_millis(step_ms.saturating_add(jitter_ms)).min(remaining)
}
