//! Coalescing, non-blocking wakeups.
//!
//! A [`WakeSender`]/[`WakeListener`] pair shares a single-slot channel. A send
//! into a full slot is dropped: the listener already has a pending wake and
//! will re-read authoritative state when it runs, so one wake covers any burst
//! of changes. Senders never block and never fail.

use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

/// Sending half of a coalescing wake slot. Cheap to clone.
#[derive(Debug, Clone)]
pub struct WakeSender {
    tx: mpsc::Sender<()>,
}

/// Receiving half of a coalescing wake slot.
#[derive(Debug)]
pub struct WakeListener {
    rx: mpsc::Receiver<()>,
}

/// Create a wake slot holding at most one pending signal
pub fn wake_channel() -> (WakeSender, WakeListener) {
    let (tx, rx) = mpsc::channel(1);
    (WakeSender { tx }, WakeListener { rx })
}

impl WakeSender {
    /// True once the listener has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl WakeListener {
    /// Wait for the next wake.
    ///
    /// Returns `false` once every sender has been dropped and no wake is
    /// pending.
    pub async fn wait(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }

    /// Consume a pending wake without waiting. Returns `true` if one was
    /// pending.
    pub fn try_take(&mut self) -> bool {
        match self.rx.try_recv() {
            Ok(()) => true,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => false,
        }
    }
}

/// Deliver a wake to one listener without blocking.
///
/// Returns `true` if a new wake was queued, `false` if it was coalesced into a
/// pending one or the listener is gone.
pub fn notify_one(listener: &WakeSender) -> bool {
    match listener.tx.try_send(()) {
        Ok(()) => true,
        Err(TrySendError::Full(())) => {
            tracing::trace!("Wake already pending, coalesced");
            false
        }
        Err(TrySendError::Closed(())) => {
            tracing::trace!("Wake listener dropped, signal discarded");
            false
        }
    }
}

/// Deliver a wake to every listener without blocking
pub fn notify_all<'a, I>(listeners: I)
where
    I: IntoIterator<Item = &'a WakeSender>,
{
    for listener in listeners {
        notify_one(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_coalesces_to_one_wake() {
        let (tx, mut rx) = wake_channel();
        assert!(notify_one(&tx));
        assert!(!notify_one(&tx));
        assert!(!notify_one(&tx));

        assert!(rx.try_take());
        assert!(!rx.try_take());
    }

    #[test]
    fn test_wake_after_consume() {
        let (tx, mut rx) = wake_channel();
        notify_one(&tx);
        assert!(rx.try_take());

        assert!(notify_one(&tx));
        assert!(rx.try_take());
    }

    #[test]
    fn test_dropped_listener_is_ignored() {
        let (tx, rx) = wake_channel();
        drop(rx);
        assert!(tx.is_closed());
        assert!(!notify_one(&tx));
    }

    #[test]
    fn test_notify_all_skips_full_slots() {
        let (busy_tx, mut busy_rx) = wake_channel();
        let (idle_tx, mut idle_rx) = wake_channel();
        notify_one(&busy_tx);

        notify_all([&busy_tx, &idle_tx]);

        assert!(busy_rx.try_take());
        assert!(!busy_rx.try_take());
        assert!(idle_rx.try_take());
    }

    #[tokio::test]
    async fn test_wait_returns_false_when_senders_gone() {
        let (tx, mut rx) = wake_channel();
        notify_one(&tx);
        drop(tx);

        assert!(rx.wait().await);
        assert!(!rx.wait().await);
    }
}
