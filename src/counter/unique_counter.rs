use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::error;

use super::{flush_sink::FlushSink, Identifier};

/// Result of a single flush.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlushReport {
    /// value of the window counter at the moment it was reset
    pub count: u64,
    /// whether the flush record reached the sink
    pub persisted: bool,
}

struct CounterState {
    seen: HashSet<Identifier>,
    window: u64,
}

/// Set of every identifier seen since construction, plus the number of
/// first-time identifiers observed in the current window.
///
/// Both live under one mutex. `observe` and `flush` take that same lock, so an
/// increment always lands in exactly one window. The set is never pruned.
pub struct UniqueCounter {
    state: Mutex<CounterState>,
}

impl UniqueCounter {
    pub fn new() -> UniqueCounter {
        UniqueCounter {
            state: Mutex::new(CounterState {
                seen: HashSet::new(),
                window: 0,
            }),
        }
    }

    /// Records `id` and returns `true` only the first time it is seen.
    pub fn observe(&self, id: Identifier) -> bool {
        let mut state = self.lock();
        let first_sight = state.seen.insert(id);
        if first_sight {
            state.window += 1;
        }
        first_sight
    }

    /// first-time identifiers counted since the last flush
    pub fn window_count(&self) -> u64 {
        self.lock().window
    }

    /// every identifier recorded so far
    pub fn distinct_count(&self) -> usize {
        self.lock().seen.len()
    }

    /// Writes the current window count to `sink` and resets it to zero.
    ///
    /// The lock is held across the write. A failed write is logged and the
    /// counter is reset anyway, so that window's value is lost.
    pub fn flush(&self, sink: &mut dyn FlushSink) -> FlushReport {
        let mut state = self.lock();
        let count = state.window;

        let persisted = match sink.write_record(count) {
            Ok(()) => true,
            Err(e) => {
                error!(count, error = %e, "dropping unique request count for this window");
                false
            }
        };

        state.window = 0;
        FlushReport { count, persisted }
    }

    // the guarded state is consistent after every statement, so a panic in
    // another holder leaves nothing to repair
    fn lock(&self) -> MutexGuard<'_, CounterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for UniqueCounter {
    fn default() -> Self {
        UniqueCounter::new()
    }
}
