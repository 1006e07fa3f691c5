//! HTTP implementation of [`LogSource`] over `/logs/`.

use std::future::Future;

use vibrae_app::ports::LogSource;
use vibrae_domain::error::VibraeError;
use vibrae_domain::logs::{LogHistory, LogSelection, LogsIndex};

use crate::client::ApiClient;

/// Log files served by the backend.
#[derive(Debug, Clone)]
pub struct HttpLogSource {
    client: ApiClient,
}

impl HttpLogSource {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl LogSource for HttpLogSource {
    fn index(&self) -> impl Future<Output = Result<LogsIndex, VibraeError>> + Send {
        let client = self.client.clone();
        async move { Ok(client.get_json("logs/").await?) }
    }

    fn history(&self, base: &str) -> impl Future<Output = Result<LogHistory, VibraeError>> + Send {
        let client = self.client.clone();
        let query = [("base", base.to_string())];
        async move { Ok(client.get_json_with_query("logs/history", &query).await?) }
    }

    fn content(
        &self,
        selection: &LogSelection,
        tail: u32,
    ) -> impl Future<Output = Result<String, VibraeError>> + Send {
        let client = self.client.clone();
        let query = [
            ("file", selection.file.clone()),
            ("history", selection.history.to_string()),
            ("tail", tail.to_string()),
        ];
        async move { Ok(client.get_text_with_query("logs/content", &query).await?) }
    }
}
