use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::{Instant, Sleep};

/// Upper bound of a randomized timeout as a multiple of its minimum.
///
/// Timeouts are drawn from `[min, TIMEOUT_SPREAD * min)`. Competing candidates
/// rely on this spread to desynchronize their retries and avoid split votes.
pub const TIMEOUT_SPREAD: u32 = 2;

/// A one-shot wake signal produced by [`ElectionTimer::schedule`].
///
/// Resolves once the scheduled deadline passes. A disabled event (scheduled
/// with a zero minimum) stays pending forever, which lets a `tokio::select!`
/// arm be switched off without restructuring the loop.
///
/// Events cannot be cancelled. Dropping the event abandons it; a caller that
/// replaced a timer must treat any late firing of the old one as a no-op.
#[derive(Debug)]
pub struct TimeoutEvent {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl TimeoutEvent {
    /// An event that never fires
    pub fn never() -> Self {
        Self { sleep: None }
    }

    fn after(delay: Duration) -> Self {
        Self {
            sleep: Some(Box::pin(tokio::time::sleep(delay))),
        }
    }

    /// The instant this event fires, or `None` if it never fires
    pub fn deadline(&self) -> Option<Instant> {
        self.sleep.as_ref().map(|s| s.deadline())
    }

    pub fn is_disabled(&self) -> bool {
        self.sleep.is_none()
    }
}

impl Future for TimeoutEvent {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match self.sleep.as_mut() {
            Some(sleep) => sleep.as_mut().poll(cx),
            None => Poll::Pending,
        }
    }
}

/// Generates randomized election and heartbeat timeouts.
///
/// The random source is owned by the timer rather than taken from global
/// state, so tests can inject a seeded generator. Successive schedules share
/// nothing but the generator.
#[derive(Debug)]
pub struct ElectionTimer<R = StdRng> {
    rng: R,
}

impl ElectionTimer<StdRng> {
    /// Timer seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Default for ElectionTimer<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> ElectionTimer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a delay uniformly from `[min, 2 * min)`.
    ///
    /// Returns `None` for a zero minimum, meaning "never time out".
    pub fn next_timeout(&mut self, min: Duration) -> Option<Duration> {
        if min.is_zero() {
            return None;
        }
        let min_nanos = u64::try_from(min.as_nanos()).unwrap_or(u64::MAX);
        let extra = Duration::from_nanos(self.rng.gen_range(0..min_nanos));
        Some(min.saturating_add(extra))
    }

    /// Schedule a timeout that fires at a random instant in `[min, 2 * min)`
    /// from now. A zero `min` yields an event that never fires.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, min: Duration) -> TimeoutEvent {
        match self.next_timeout(min) {
            Some(delay) => {
                tracing::trace!(
                    min_ms = min.as_millis() as u64,
                    delay_ms = delay.as_millis() as u64,
                    "Scheduled randomized timeout"
                );
                TimeoutEvent::after(delay)
            }
            None => TimeoutEvent::never(),
        }
    }
}

/// Schedule a randomized timeout using the thread-local generator.
///
/// Must be called from within a tokio runtime.
pub fn random_timeout(min: Duration) -> TimeoutEvent {
    ElectionTimer::new(rand::thread_rng()).schedule(min)
}
