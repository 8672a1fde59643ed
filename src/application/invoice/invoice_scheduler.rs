use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::domain::invoice::InvoiceService;

/// Time between invoice batches.
pub const INVOICE_INTERVAL: Duration = Duration::from_secs(3 * 60 * 60);
/// Total span the scheduler runs for, measured from start.
pub const SCHEDULE_DURATION: Duration = Duration::from_secs(24 * 60 * 60);
/// Floor for custom intervals; tokio rejects a zero period.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
  Idle,
  Running,
  Stopped(StopReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
  DeadlineElapsed,
  Manual,
}

/// Bounded periodic invoice generation.
///
/// Generates one batch immediately on start, one per interval afterwards, and
/// stops for good when the duration elapses or the handle is stopped. Missed
/// ticks are skipped rather than queued. A batch still in flight when the next
/// tick is due delays that tick; batches never overlap.
pub struct InvoiceScheduler {
  invoice_service: Arc<InvoiceService>,
  interval: Duration,
  duration: Duration,
}

impl InvoiceScheduler {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self::with_timing(invoice_service, INVOICE_INTERVAL, SCHEDULE_DURATION)
  }

  pub(crate) fn with_timing(
    invoice_service: Arc<InvoiceService>,
    interval: Duration,
    duration: Duration,
  ) -> Self {
    Self {
      invoice_service,
      interval: interval.max(MIN_INTERVAL),
      duration,
    }
  }

  /// Spawns the scheduler loop onto the current tokio runtime.
  pub fn start(self) -> SchedulerHandle {
    let cancel = CancellationToken::new();
    let (state_tx, state_rx) = watch::channel(SchedulerState::Idle);
    let task = tokio::spawn(self.run(cancel.clone(), state_tx));

    SchedulerHandle {
      cancel,
      state: state_rx,
      task,
    }
  }

  async fn run(
    self,
    cancel: CancellationToken,
    state: watch::Sender<SchedulerState>,
  ) -> StopReason {
    let started = Instant::now();
    let deadline = tokio::time::sleep_until(started + self.duration);
    tokio::pin!(deadline);

    let mut ticker = tokio::time::interval_at(started + self.interval, self.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    state.send_replace(SchedulerState::Running);
    tracing::info!(
      interval_secs = self.interval.as_secs(),
      duration_secs = self.duration.as_secs(),
      "Invoice scheduler started"
    );

    self.generate_batch().await;

    let reason = loop {
      tokio::select! {
        biased;
        _ = cancel.cancelled() => {
          tracing::info!("Invoice scheduler stopped manually");
          break StopReason::Manual;
        }
        _ = &mut deadline => {
          tracing::info!("Invoice schedule completed, stopping scheduler");
          break StopReason::DeadlineElapsed;
        }
        _ = ticker.tick() => {
          self.generate_batch().await;
        }
      }
    };

    state.send_replace(SchedulerState::Stopped(reason));
    reason
  }

  // Failures are reported and the schedule carries on
  async fn generate_batch(&self) {
    if let Err(e) = self.invoice_service.generate_random_invoices().await {
      tracing::warn!("Invoice batch failed: {}", e);
    }
  }
}

/// Control handle for a running [`InvoiceScheduler`].
pub struct SchedulerHandle {
  cancel: CancellationToken,
  state: watch::Receiver<SchedulerState>,
  task: JoinHandle<StopReason>,
}

impl SchedulerHandle {
  /// Requests a manual stop. Safe to call repeatedly or after the scheduler finished.
  pub fn stop(&self) {
    self.cancel.cancel();
  }

  /// Token that stops the scheduler when cancelled, for wiring into shutdown paths.
  pub fn stop_token(&self) -> CancellationToken {
    self.cancel.clone()
  }

  pub fn state(&self) -> SchedulerState {
    *self.state.borrow()
  }

  pub fn subscribe(&self) -> watch::Receiver<SchedulerState> {
    self.state.clone()
  }

  /// Waits for the loop to exit and returns why it stopped.
  pub async fn wait(self) -> Result<StopReason, JoinError> {
    self.task.await
  }
}
