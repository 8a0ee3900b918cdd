//! Background execution of network calls for the UI loop.
//!
//! Every call is spawned onto the tokio runtime and its outcome comes back as a
//! completion message over an unbounded channel. The owner drains completions
//! from its event loop tick, so the loop itself never waits on the network.
//!
//! # Example
//!
//! ```ignore
//! let mut orchestrator = Orchestrator::new();
//! let api = api.clone();
//! orchestrator.spawn(async move { Completion::Listed(api.list(10).await) });
//!
//! // In event loop tick
//! while let Some(completion) = orchestrator.try_next() {
//!     apply(completion);
//! }
//! ```

use std::future::Future;
use tokio::sync::mpsc;

/// Runs futures in the background and collects their completions in arrival order.
///
/// There is no cancellation and no deduplication: every spawned future runs to
/// the end and delivers exactly one completion.
pub struct Orchestrator<C> {
  sender: mpsc::UnboundedSender<C>,
  receiver: mpsc::UnboundedReceiver<C>,
  in_flight: usize,
}

impl<C: Send + 'static> Orchestrator<C> {
  pub fn new() -> Self {
    let (sender, receiver) = mpsc::unbounded_channel();
    Self {
      sender,
      receiver,
      in_flight: 0,
    }
  }

  /// Start a future in the background. Its output is delivered by `try_next`/`next`.
  pub fn spawn<Fut>(&mut self, future: Fut)
  where
    Fut: Future<Output = C> + Send + 'static,
  {
    self.in_flight += 1;
    let sender = self.sender.clone();
    tokio::spawn(async move {
      let completion = future.await;
      // Ignore send errors - the session may have been dropped
      let _ = sender.send(completion);
    });
  }

  /// Number of spawned futures whose completion has not been taken yet
  #[cfg(test)]
  pub fn in_flight(&self) -> usize {
    self.in_flight
  }

  /// Take a completion if one has already arrived, without waiting
  pub fn try_next(&mut self) -> Option<C> {
    match self.receiver.try_recv() {
      Ok(completion) => {
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
      }
      Err(_) => None,
    }
  }

  /// Wait for the next completion. Returns `None` when nothing is in flight.
  pub async fn next(&mut self) -> Option<C> {
    if self.in_flight == 0 {
      return None;
    }
    let completion = self.receiver.recv().await?;
    self.in_flight -= 1;
    Some(completion)
  }
}

impl<C: Send + 'static> Default for Orchestrator<C> {
  fn default() -> Self {
    Self::new()
  }
}

impl<C> std::fmt::Debug for Orchestrator<C> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Orchestrator")
      .field("in_flight", &self.in_flight)
      .finish_non_exhaustive()
  }
}
