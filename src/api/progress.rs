//! Server-sent progress stream (`text/event-stream`).
//!
//! The backend emits `data:<percent>` events with one decimal while a solve
//! runs. Only `data:` fields are read; comments and other fields are skipped.

use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::http_client;

use super::{ApiError, Endpoint};

/// Percentage at which the stream is considered finished.
pub const COMPLETE_PERCENT: f32 = 100.0;

/// Parse one SSE line into a clamped percentage.
///
/// Returns `None` for lines that carry no data field.
pub fn parse_progress_line(line: &str) -> Option<Result<f32, String>> {
    let value = line.trim_end_matches(['\r', '\n']).strip_prefix("data:")?;
    let value = value.trim();
    Some(
        value
            .parse::<f32>()
            .ok()
            .filter(|percent| percent.is_finite())
            .map(|percent| percent.clamp(0.0, COMPLETE_PERCENT))
            .ok_or_else(|| format!("not a percentage: {value:?}")),
    )
}

/// Blocking iterator over the percentages of one progress stream.
///
/// Ends after a value of 100, at end of stream, on error, or once the cancel
/// flag is raised (checked between reads).
pub struct ProgressSubscription {
    reader: BufReader<Box<dyn Read + Send + Sync + 'static>>,
    cancel: Arc<AtomicBool>,
    read_timeout: Duration,
    finished: bool,
}

impl ProgressSubscription {
    pub(super) fn new(
        reader: Box<dyn Read + Send + Sync + 'static>,
        cancel: Arc<AtomicBool>,
        read_timeout: Duration,
    ) -> Self {
        Self {
            reader: BufReader::new(reader),
            cancel,
            read_timeout,
            finished: false,
        }
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

impl Iterator for ProgressSubscription {
    type Item = Result<f32, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        while !self.finished {
            if self.cancelled() {
                self.finished = true;
                break;
            }
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    self.finished = true;
                }
                Ok(_) => match parse_progress_line(&line) {
                    None => continue,
                    Some(Ok(percent)) => {
                        if percent >= COMPLETE_PERCENT {
                            self.finished = true;
                        }
                        return Some(Ok(percent));
                    }
                    Some(Err(message)) => {
                        self.finished = true;
                        return Some(Err(ApiError::Malformed {
                            endpoint: Endpoint::Progress,
                            message,
                        }));
                    }
                },
                Err(err) => {
                    self.finished = true;
                    let error = if http_client::is_timeout_io(&err) {
                        ApiError::TimedOut {
                            endpoint: Endpoint::Progress,
                            after: self.read_timeout,
                        }
                    } else {
                        ApiError::Transport {
                            endpoint: Endpoint::Progress,
                            message: err.to_string(),
                        }
                    };
                    return Some(Err(error));
                }
            }
        }
        None
    }
}
