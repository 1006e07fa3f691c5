//! Log port: the backend's `/logs/` endpoints.

use std::future::Future;

use vibrae_domain::error::VibraeError;
use vibrae_domain::logs::{LogHistory, LogSelection, LogsIndex};

pub trait LogSource {
    /// Live logs and every rotated file, newest rotated first.
    fn index(&self) -> impl Future<Output = Result<LogsIndex, VibraeError>> + Send;

    /// Rotated files belonging to `base` (e.g. `backend.log`).
    fn history(&self, base: &str) -> impl Future<Output = Result<LogHistory, VibraeError>> + Send;

    /// The last `tail` lines of the selected file as plain text.
    fn content(
        &self,
        selection: &LogSelection,
        tail: u32,
    ) -> impl Future<Output = Result<String, VibraeError>> + Send;
}
