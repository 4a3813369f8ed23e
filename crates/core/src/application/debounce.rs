// Toggle Debouncer - per-control trailing-edge coalescing

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// Default coalescing window for toggle controls
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_millis(100);

/// Coalesces rapid input on the same control.
///
/// Each key (one per toggle control) has its own generation counter, so
/// controls never wait on each other. Cloning shares the counters.
#[derive(Clone)]
pub struct ToggleDebouncer {
    interval: Duration,
    generations: Arc<Mutex<HashMap<String, u64>>>,
}

impl Default for ToggleDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_INTERVAL)
    }
}

impl ToggleDebouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            generations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait out the interval and return `Some(value)` only if no newer
    /// submission arrived for `key` in the meantime.
    pub async fn submit<T>(&self, key: &str, value: T) -> Option<T> {
        let ticket = self.bump(key);
        sleep(self.interval).await;
        (self.current(key) == Some(ticket)).then_some(value)
    }

    fn bump(&self, key: &str) -> u64 {
        let mut generations = self
            .generations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let generation = generations.entry(key.to_string()).or_insert(0);
        *generation += 1;
        *generation
    }

    fn current(&self, key: &str) -> Option<u64> {
        self.generations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .copied()
    }
}
