use std::{sync::Arc, time::Duration};

use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use super::{flush_sink::FlushSink, unique_counter::UniqueCounter};

/// Background task that flushes the window counter once per period.
///
/// The task runs until this handle is dropped. The server keeps the handle in
/// its managed state, so in practice the loop lives as long as the process.
pub struct FlushLoop {
    period: Duration,
    _task: JoinHandle<()>,
    _cancel_signal_sender: Option<oneshot::Sender<()>>,
}

impl FlushLoop {
    /// Spawns the loop on the current tokio runtime. The first flush happens
    /// one full `period` after this call.
    pub fn spawn(
        counter: Arc<UniqueCounter>,
        mut sink: Box<dyn FlushSink>,
        period: Duration,
    ) -> FlushLoop {
        let (cancel_signal_sender, mut cancel_signal_receiver) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            // a slow flush must not cause a burst of catch-up flushes
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    // an Err here means the handle was dropped without sending
                    _ = &mut cancel_signal_receiver => break,
                    _ = ticker.tick() => {
                        let report = counter.flush(sink.as_mut());
                        info!(
                            count = report.count,
                            persisted = report.persisted,
                            distinct = counter.distinct_count(),
                            "flushed unique request window"
                        );
                    }
                }
            }

            debug!("flush loop stopped");
        });

        FlushLoop {
            period,
            _task: task,
            _cancel_signal_sender: Some(cancel_signal_sender),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for FlushLoop {
    fn drop(&mut self) {
        // signal the task to stop at its next wake-up
        if let Some(signal) = self._cancel_signal_sender.take() {
            let _ = signal.send(());
        }
    }
}
