use std::sync::Arc;

use swingmeter_core::{
    CharacterRecord, MeterConfig, MeterConfigExt, StoreError, SystemClock, Tracker, TrackerHandle,
};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub log_tail: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Stop the tail task. Returns true if one was running.
    pub fn stop_tail(&mut self) -> bool {
        match self.log_tail.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

/// Holds all shared state for the CLI application.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<MeterConfig>>,
    /// The logged-in character's tracker, shared with the tail task
    pub tracker: TrackerHandle,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    pub fn new() -> Self {
        let config = MeterConfig::load();
        let tracker = load_tracker(&config);
        Self {
            config: Arc::new(RwLock::new(config)),
            tracker: Arc::new(RwLock::new(tracker)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        }
    }

    /// Write the current character's stored sessions to disk.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let config = self.config.read().await;
        let record = CharacterRecord {
            character: config.character.clone(),
            store: self.tracker.read().await.store().clone(),
        };
        record.save(&config.data_path())?;
        Ok(())
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Start a tracker on top of the character's saved record. An unreadable
/// record is logged and replaced by an empty one.
pub fn load_tracker(config: &MeterConfig) -> Tracker<SystemClock> {
    let store = match CharacterRecord::load(&config.data_path(), &config.character) {
        Ok(record) => record.store,
        Err(e) => {
            tracing::warn!(character = %config.character, error = %e, "starting with an empty record");
            Default::default()
        }
    };
    Tracker::with_store(SystemClock, store)
}
