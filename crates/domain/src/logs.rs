//! Backend log listings, selections and line classification.

use serde::{Deserialize, Serialize};

/// Lines requested when no positive tail is given.
pub const DEFAULT_TAIL: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFile {
    pub name: String,
    pub size: u64,
    /// Modification time, seconds since the Unix epoch.
    pub mtime: i64,
}

/// Response of `GET /logs/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogsIndex {
    #[serde(default)]
    pub current: Vec<LogFile>,
    #[serde(default)]
    pub history: Vec<LogFile>,
}

/// Response of `GET /logs/history?base=`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogHistory {
    pub base: String,
    #[serde(default)]
    pub history: Vec<LogFile>,
}

/// A file picked in the logs view: either a live log or a rotated one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSelection {
    pub file: String,
    pub history: bool,
}

impl LogSelection {
    #[must_use]
    pub fn current(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            history: false,
        }
    }

    #[must_use]
    pub fn rotated(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            history: true,
        }
    }

    /// The live log a selection belongs to.
    ///
    /// Rotated files are named `<base>-<date>-<time>.log`, so
    /// `backend-20240101-120000.log` belongs to `backend.log`.
    #[must_use]
    pub fn history_base(&self) -> String {
        if self.history {
            let prefix = self.file.split('-').next().unwrap_or_default().trim();
            format!("{prefix}.log")
        } else {
            self.file.clone()
        }
    }
}

/// Append `.log` unless already present.
#[must_use]
pub fn normalize_base(base: &str) -> String {
    if base.ends_with(".log") {
        base.to_string()
    } else {
        format!("{base}.log")
    }
}

/// Tail length to request: the given value when positive, else [`DEFAULT_TAIL`].
#[must_use]
pub fn effective_tail(tail: Option<i64>) -> u32 {
    tail.filter(|t| *t > 0)
        .and_then(|t| u32::try_from(t).ok())
        .unwrap_or(DEFAULT_TAIL)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "DEBUG" | "DBG" => Some(Self::Debug),
            "INFO" | "INF" => Some(Self::Info),
            "WARNING" | "WARN" | "WRN" => Some(Self::Warning),
            "ERROR" | "ERR" => Some(Self::Error),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Find the level of a log line.
    ///
    /// Recognises `LEVEL: msg` (uvicorn) and a level in the second or third
    /// whitespace-separated field after a timestamp, including the
    /// three-letter codes (`INF`, `WRN`, `ERR`, `DBG`).
    #[must_use]
    pub fn detect(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let first = fields.next()?;
        if let Some(level) = first.strip_suffix(':').and_then(Self::from_token) {
            return Some(level);
        }
        if !first.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        fields.take(2).find_map(Self::from_token)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Error | Self::Critical)
    }
}

/// How a single line of log content should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// `----- ... start ... -----` banners written at process start.
    Banner,
    Entry(LogLevel),
    /// Traceback lines, or continuation lines after an error entry.
    Stack,
    Plain,
}

/// Classify every line of `text`; continuation lines after an error or
/// critical entry are marked as stack until the next blank or entry line.
#[must_use]
pub fn classify_lines(text: &str) -> Vec<(LineKind, &str)> {
    let mut in_stack = false;
    text.lines()
        .map(|line| {
            let kind = if line.trim().is_empty() {
                in_stack = false;
                LineKind::Blank
            } else if is_banner(line) {
                in_stack = false;
                LineKind::Banner
            } else if let Some(level) = LogLevel::detect(line) {
                in_stack = level.is_failure();
                LineKind::Entry(level)
            } else if in_stack
                || line.starts_with("Traceback ")
                || line.trim_start().starts_with("File ")
            {
                LineKind::Stack
            } else {
                LineKind::Plain
            };
            (kind, line)
        })
        .collect()
}

fn is_banner(line: &str) -> bool {
    line.starts_with("----- ")
        && line.ends_with(" -----")
        && line.to_ascii_lowercase().contains(" start ")
}
