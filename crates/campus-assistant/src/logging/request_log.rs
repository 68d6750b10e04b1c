//! Request log with a background writer
//!
//! Handlers push events into a bounded queue and return immediately. A single
//! worker on the blocking pool drains the queue and writes each line to the
//! console and the rotating file, in queue order.

use chrono::{DateTime, Local};
use std::io::Write;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

use super::rotating::RotatingFile;

/// Severity of a request log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }
}

/// A single request log event
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEvent {
    fn now(level: LogLevel, message: String) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            message,
        }
    }

    /// Render as `YYYY-MM-DD HH:MM:SS | LEVEL | message`
    pub fn format_line(&self) -> String {
        format!(
            "{} | {} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level.as_str(),
            self.message
        )
    }
}

enum LogCommand {
    Entry(LogEvent),
    Flush(oneshot::Sender<()>),
    Shutdown,
}

/// Destinations the worker writes to
struct LogSink {
    file: RotatingFile,
    console: bool,
}

impl LogSink {
    fn write(&mut self, event: &LogEvent) {
        let line = event.format_line();

        if self.console {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{}", line);
        }

        if let Err(e) = self.file.write_line(&line).and_then(|_| self.file.flush()) {
            tracing::error!(
                "Failed to write request log {}: {}",
                self.file.path().display(),
                e
            );
        }
    }

    fn flush(&mut self) {
        if self.console {
            let _ = std::io::stdout().flush();
        }
        let _ = self.file.flush();
    }
}

/// Cloneable handle for writing to the request log
#[derive(Clone)]
pub struct RequestLogger {
    tx: mpsc::Sender<LogCommand>,
}

/// Owns the writer task; shut it down to drain the queue before exit
pub struct LogWorker {
    tx: mpsc::Sender<LogCommand>,
    handle: JoinHandle<()>,
}

impl RequestLogger {
    /// Open the log file and start the writer
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(config: &LoggingConfig) -> Result<(Self, LogWorker)> {
        let file = RotatingFile::open(&config.file, config.max_bytes, config.backups)
            .map_err(|e| {
                Error::Config(format!(
                    "Failed to open request log {}: {}",
                    config.file.display(),
                    e
                ))
            })?;

        Ok(Self::spawn(
            LogSink {
                file,
                console: config.console,
            },
            config.queue_capacity.max(1),
        ))
    }

    fn spawn(mut sink: LogSink, capacity: usize) -> (Self, LogWorker) {
        let (tx, mut rx) = mpsc::channel(capacity);

        let handle = tokio::task::spawn_blocking(move || {
            while let Some(command) = rx.blocking_recv() {
                match command {
                    LogCommand::Entry(event) => sink.write(&event),
                    LogCommand::Flush(ack) => {
                        sink.flush();
                        let _ = ack.send(());
                    }
                    LogCommand::Shutdown => break,
                }
            }
            sink.flush();
        });

        (
            Self { tx: tx.clone() },
            LogWorker { tx, handle },
        )
    }

    /// Record an informational line
    pub fn info(&self, message: impl Into<String>) {
        self.submit(LogLevel::Info, message.into());
    }

    /// Record an error line
    pub fn error(&self, message: impl Into<String>) {
        self.submit(LogLevel::Error, message.into());
    }

    fn submit(&self, level: LogLevel, message: String) {
        let command = LogCommand::Entry(LogEvent::now(level, message));

        match self.tx.try_send(command) {
            Ok(()) => {}
            // Queue is full: hand the line to a task that waits for room
            Err(mpsc::error::TrySendError::Full(command)) => {
                match tokio::runtime::Handle::try_current() {
                    Ok(runtime) => {
                        let tx = self.tx.clone();
                        runtime.spawn(async move {
                            let _ = tx.send(command).await;
                        });
                    }
                    Err(_) => tracing::warn!("Request log queue full outside runtime, line dropped"),
                }
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("Request log is closed, line dropped");
            }
        }
    }

    /// Wait until everything queued so far has been written
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(LogCommand::Flush(ack_tx)).await.is_ok() {
            let _ = ack_rx.await;
        }
    }
}

impl LogWorker {
    /// Write out everything already queued, then stop the writer
    pub async fn shutdown(self) {
        let _ = self.tx.send(LogCommand::Shutdown).await;
        if let Err(e) = self.handle.await {
            tracing::error!("Request log writer panicked: {}", e);
        }
    }
}
