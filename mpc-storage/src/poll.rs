//! Bounded polling against the shared storage.

use std::time::Duration;

use eyre::bail;

/// How a party polls the shared storage while waiting for its peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between two probes. A zero tick busy-spins instead of sleeping,
    /// which trades CPU for latency in fast local deployments.
    pub tick: Duration,
    /// Number of one-second escalation rounds before giving up.
    pub escalations: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(1),
            escalations: 20,
        }
    }
}

const SPIN_ROUNDS: u64 = 50_000_000;

/// Polls `probe` until it yields a value.
///
/// Roughly every second without progress a warning naming `what` is logged,
/// so a stuck deployment surfaces in the logs long before the deadline.
/// After [`PollConfig::escalations`] such rounds the wait is treated as a
/// fatal networking or concurrency problem and the computation is aborted.
pub fn wait_until<T>(
    cfg: PollConfig,
    what: &str,
    mut probe: impl FnMut() -> Option<T>,
) -> eyre::Result<T> {
    let mut tick = cfg.tick;
    if tick.is_zero() {
        for _ in 0..SPIN_ROUNDS {
            if let Some(value) = probe() {
                return Ok(value);
            }
            std::hint::spin_loop();
        }
        tracing::warn!("spent {SPIN_ROUNDS} spins waiting on {what}; falling back to sleeping");
        tick = Duration::from_millis(1);
    }

    let probes_per_round = Duration::from_secs(1).div_duration_f64(tick).ceil() as u32;
    for round in 0..cfg.escalations {
        for _ in 0..probes_per_round {
            if let Some(value) = probe() {
                return Ok(value);
            }
            std::thread::sleep(tick);
        }
        tracing::warn!(
            "still waiting on {what} after roughly {} second(s)",
            round + 1
        );
    }
    bail!("unknown concurrency or networking issue while waiting on {what}; aborting");
}
