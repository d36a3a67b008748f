//! Bounded status polling
//!
//! Providers model asynchronous resource operations (deploy, delete,
//! power transitions) as: issue request, receive an id, poll a status
//! endpoint until a terminal state. The loop here is deliberately plain:
//! a fixed sleep interval and an overall ceiling, after which it fails
//! loudly with [`Error::PollTimeout`].

use crate::config::PollDef;
use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Outcome of one status probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Target state not reached yet; carries the observed state
    Pending(String),
    /// Target state reached; carries the terminal state
    Terminal(String),
}

/// Poll until a probe reports a terminal state
///
/// Probes immediately, then every `interval_secs`. Probe errors
/// propagate at once; only `Pending` keeps the loop alive. Concurrent
/// polls for different resource ids share no state and are safe.
pub async fn wait_until<F, Fut>(config: &PollDef, wanted: &str, mut probe: F) -> Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Probe>>,
{
    let started = Instant::now();
    let ceiling = Duration::from_secs(config.timeout_secs);
    let interval = Duration::from_secs(config.interval_secs);
    let mut last_seen = String::from("<unknown>");

    loop {
        match probe().await? {
            Probe::Terminal(state) => {
                debug!(state, "poll reached terminal state");
                return Ok(state);
            }
            Probe::Pending(state) => {
                debug!(state, "poll still pending");
                last_seen = state;
            }
        }

        if started.elapsed() + interval > ceiling {
            return Err(Error::PollTimeout {
                waited_secs: started.elapsed().as_secs(),
                wanted: wanted.to_string(),
                last_seen,
            });
        }
        tokio::time::sleep(interval).await;
    }
}
