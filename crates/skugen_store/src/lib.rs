//! Skugen store: history persistence, settings, and the wall clock.
mod clock;
mod history_store;
mod persist;
mod settings;

pub use clock::utc_now_rfc3339;
pub use history_store::{HistoryStore, StoreError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use settings::{LogLevel, Settings, SettingsError, DEFAULT_HISTORY_FILENAME};
