//! Log service: browsing backend log files.

use vibrae_domain::error::VibraeError;
use vibrae_domain::logs::{LogHistory, LogSelection, LogsIndex, effective_tail, normalize_base};

use crate::ports::LogSource;

pub struct LogService<L> {
    source: L,
}

impl<L: LogSource> LogService<L> {
    pub fn new(source: L) -> Self {
        Self { source }
    }

    /// # Errors
    ///
    /// Returns a backend error from the log source.
    pub async fn index(&self) -> Result<LogsIndex, VibraeError> {
        self.source.index().await
    }

    /// The tail of the selected file; a missing or non-positive `tail`
    /// falls back to the default line count.
    ///
    /// # Errors
    ///
    /// Returns a backend error from the log source.
    pub async fn content(
        &self,
        selection: &LogSelection,
        tail: Option<i64>,
    ) -> Result<String, VibraeError> {
        let tail = effective_tail(tail);
        tracing::debug!(file = %selection.file, history = selection.history, tail, "fetching log content");
        self.source.content(selection, tail).await
    }

    /// Rotated files that belong to the same log as `selection`.
    ///
    /// # Errors
    ///
    /// Returns a backend error from the log source.
    pub async fn history_for(&self, selection: &LogSelection) -> Result<LogHistory, VibraeError> {
        let base = normalize_base(&selection.history_base());
        self.source.history(&base).await
    }
}
