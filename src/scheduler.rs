#![cfg(feature = "std")]

//! Delayed delivery of opponent turns.

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use crate::game::TurnTicket;

/// Hands turn tickets back after a fixed delay.
///
/// Each scheduled ticket gets its own sleeping task; once scheduled it
/// cannot be cancelled. Tickets outliving a reset are rejected by the
/// engine's epoch check when they are resolved.
pub struct TurnScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<TurnTicket>,
    rx: mpsc::UnboundedReceiver<TurnTicket>,
}

impl TurnScheduler {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { delay, tx, rx }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Deliver `ticket` once the delay has elapsed. Must be called from
    /// within a tokio runtime.
    pub fn schedule(&self, ticket: TurnTicket) {
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            sleep(delay).await;
            // receiver only goes away with the scheduler itself
            let _ = tx.send(ticket);
        });
    }

    /// Wait for the next due ticket. Cancel safe.
    pub async fn next_due(&mut self) -> TurnTicket {
        match self.rx.recv().await {
            Some(ticket) => ticket,
            // we hold a sender, so the channel never closes
            None => std::future::pending().await,
        }
    }

    /// A ticket that is already due, if any, without waiting.
    pub fn try_next_due(&mut self) -> Option<TurnTicket> {
        self.rx.try_recv().ok()
    }
}
