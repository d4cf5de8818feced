//! Decides when a pipeline runs.
//!
//! Two independent triggers feed one state machine: a fixed-interval timer and notifications
//! from the event bus. At most one run is in flight per pipeline. Ticks that arrive mid-run are
//! dropped; notifications that arrive mid-run collapse into a single follow-up run.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::Instrument;

use crate::{
    events::{EngineEvent, EventBus},
    models::RecommendationResult,
    services::{display::DisplaySlot, pipeline::Pipeline},
};

const MIN_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    /// Running, with one follow-up run queued
    Pending,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Tick,
    Notification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartRun,
    DropTick,
    QueueFollowUp,
    AlreadyQueued,
    Nothing,
}

impl SchedulerState {
    pub fn on_trigger(self, trigger: Trigger) -> (Self, Action) {
        use SchedulerState::*;
        match (self, trigger) {
            (Idle, _) => (Running, Action::StartRun),
            (Running, Trigger::Tick) | (Pending, Trigger::Tick) => (self, Action::DropTick),
            (Running, Trigger::Notification) => (Pending, Action::QueueFollowUp),
            (Pending, Trigger::Notification) => (Pending, Action::AlreadyQueued),
            (Stopped, _) => (Stopped, Action::Nothing),
        }
    }

    pub fn on_run_complete(self) -> (Self, Action) {
        use SchedulerState::*;
        match self {
            Running => (Idle, Action::Nothing),
            Pending => (Running, Action::StartRun),
            Idle | Stopped => (self, Action::Nothing),
        }
    }
}

/// Drives one pipeline from timer ticks and bus notifications
pub struct UpdateScheduler {
    pipeline: Arc<dyn Pipeline>,
    interval: Duration,
    slot: DisplaySlot,
    events: broadcast::Receiver<Arc<EngineEvent>>,
}

/// Handle for stopping a running scheduler
pub struct SchedulerHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Stops the timer and any queued follow-up run
    ///
    /// A run already in flight is left to finish, but its result is never published.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Scheduler task join error");
        }
    }
}

impl UpdateScheduler {
    /// Creates a scheduler subscribed to `bus`
    ///
    /// Subscription happens here so notifications published before `spawn` are not lost.
    pub fn new(
        pipeline: Arc<dyn Pipeline>,
        interval: Duration,
        bus: &EventBus,
        slot: DisplaySlot,
    ) -> Self {
        if interval < MIN_INTERVAL {
            tracing::warn!(
                requested_ms = interval.as_millis() as u64,
                "Update interval too short, clamping to one second"
            );
        }
        Self {
            pipeline,
            interval: interval.max(MIN_INTERVAL),
            slot,
            events: bus.subscribe(),
        }
    }

    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let task = tokio::spawn(self.run_loop(shutdown_rx));
        SchedulerHandle { shutdown_tx, task }
    }

    async fn run_loop(mut self, mut shutdown_rx: mpsc::Receiver<()>) {
        let kind = self.pipeline.kind();
        let (done_tx, mut done_rx) = mpsc::channel::<(u64, RecommendationResult)>(1);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut state = SchedulerState::Idle;
        let mut seq: u64 = 0;
        let mut events_open = true;

        tracing::info!(
            kind = %kind,
            interval_ms = self.interval.as_millis() as u64,
            "Scheduler started"
        );

        loop {
            let (next, action) = tokio::select! {
                _ = shutdown_rx.recv() => {
                    let queued = state == SchedulerState::Pending;
                    state = SchedulerState::Stopped;
                    tracing::info!(kind = %kind, suppressed_follow_up = queued, ?state, "Scheduler stopped");
                    break;
                }
                Some((run, result)) = done_rx.recv() => {
                    self.slot.publish(run, result).await;
                    state.on_run_complete()
                }
                _ = ticker.tick() => state.on_trigger(Trigger::Tick),
                received = self.events.recv(), if events_open => match received {
                    Ok(event) => {
                        if !self.pipeline.on_event(&event) {
                            continue;
                        }
                        tracing::debug!(kind = %kind, notification = event.name(), "Notification received");
                        state.on_trigger(Trigger::Notification)
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        if !self.pipeline.wants_notifications() {
                            continue;
                        }
                        tracing::warn!(kind = %kind, missed, "Notification receiver lagged");
                        state.on_trigger(Trigger::Notification)
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        events_open = false;
                        continue;
                    }
                },
            };

            state = next;
            match action {
                Action::StartRun => {
                    seq += 1;
                    self.start_run(seq, done_tx.clone());
                }
                Action::DropTick => {
                    tracing::debug!(kind = %kind, "Run in progress, dropping tick");
                }
                Action::QueueFollowUp => {
                    tracing::info!(kind = %kind, "Run in progress, follow-up queued");
                }
                Action::AlreadyQueued => {
                    tracing::debug!(kind = %kind, "Follow-up already queued, coalescing");
                }
                Action::Nothing => {}
            }
        }
    }

    fn start_run(&self, seq: u64, done_tx: mpsc::Sender<(u64, RecommendationResult)>) {
        let pipeline = self.pipeline.clone();
        let span = tracing::info_span!("pipeline_run", kind = %pipeline.kind(), run = seq);
        tokio::spawn(
            async move {
                let result = pipeline.run().await;
                tracing::info!(degraded = result.is_degraded(), "Run finished");
                // Receiver is gone after shutdown; the result is discarded
                let _ = done_tx.send((seq, result)).await;
            }
            .instrument(span),
        );
    }
}
