use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use super::requests::{RequestGuard, RequestToken};
use crate::api::{ApiClient, ApiError, SolveReply};
use crate::model::{Budget, BudgetRange, Institution, RiskModelSnapshot};

/// Results posted back to the UI thread by worker threads.
#[derive(Debug)]
pub(crate) enum JobMessage {
    SpreadsheetLoaded {
        token: RequestToken,
        result: Result<String, ApiError>,
    },
    ModelListLoaded {
        token: RequestToken,
        select: Option<String>,
        result: Result<Vec<String>, ApiError>,
    },
    RiskModelLoaded {
        token: RequestToken,
        result: Result<RiskModelSnapshot, ApiError>,
    },
    ModelSaved {
        token: RequestToken,
        config_path: String,
        result: Result<(), ApiError>,
    },
    Solved {
        token: RequestToken,
        range: BudgetRange,
        result: Result<SolveReply, ApiError>,
    },
    InstitutionLoaded {
        token: RequestToken,
        range: BudgetRange,
        result: Result<Institution, ApiError>,
    },
    ChecklistLoaded {
        token: RequestToken,
        budget: Budget,
        result: Result<String, ApiError>,
    },
    Progress {
        subscription: u64,
        event: ProgressEvent,
    },
}

#[derive(Debug, PartialEq)]
pub(crate) enum ProgressEvent {
    Value(f32),
    Failed(ApiError),
    Ended,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    pub(super) requests: RequestGuard,
    progress_subscription: u64,
    progress_active: bool,
    progress_cancel: Option<Arc<AtomicBool>>,
    repaint: Option<egui::Context>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            requests: RequestGuard::default(),
            progress_subscription: 0,
            progress_active: false,
            progress_cancel: None,
            repaint: None,
        }
    }

    pub(super) fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    #[cfg(test)]
    pub(super) fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    /// Run `work` on a fresh thread and post its message back.
    pub(super) fn spawn<F>(&self, work: F)
    where
        F: FnOnce() -> JobMessage + Send + 'static,
    {
        let tx = self.message_tx.clone();
        let repaint = self.repaint.clone();
        thread::spawn(move || {
            let _ = tx.send(work());
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    pub(super) fn has_pending(&self) -> bool {
        self.requests.any_in_flight() || self.progress_active
    }

    /// Open a new progress subscription, cancelling the previous one.
    pub(super) fn start_progress(&mut self, api: ApiClient) -> u64 {
        self.cancel_progress();
        self.progress_subscription += 1;
        self.progress_active = true;
        let subscription = self.progress_subscription;
        let cancel = Arc::new(AtomicBool::new(false));
        self.progress_cancel = Some(cancel.clone());
        let tx = self.message_tx.clone();
        let repaint = self.repaint.clone();
        thread::spawn(move || {
            let post = |event: ProgressEvent| {
                let sent = tx.send(JobMessage::Progress {
                    subscription,
                    event,
                });
                if let Some(ctx) = &repaint {
                    ctx.request_repaint();
                }
                sent.is_ok()
            };
            let stream = match api.subscribe_progress(cancel.clone()) {
                Ok(stream) => stream,
                Err(err) => {
                    post(ProgressEvent::Failed(err));
                    return;
                }
            };
            for item in stream {
                let event = match item {
                    Ok(percent) => ProgressEvent::Value(percent),
                    Err(err) => ProgressEvent::Failed(err),
                };
                if !post(event) {
                    return;
                }
            }
            if !cancel.load(Ordering::Relaxed) {
                post(ProgressEvent::Ended);
            }
        });
        subscription
    }

    /// True when `subscription` is the stream the UI is listening to.
    pub(super) fn is_current_progress(&self, subscription: u64) -> bool {
        self.progress_active && subscription == self.progress_subscription
    }

    /// The current stream reached a terminal event.
    pub(super) fn finish_progress(&mut self) {
        self.progress_active = false;
        self.progress_cancel = None;
    }

    /// Ask the stream thread to stop and ignore anything it still sends.
    pub(super) fn cancel_progress(&mut self) {
        if let Some(cancel) = self.progress_cancel.take() {
            cancel.store(true, Ordering::Relaxed);
        }
        self.progress_active = false;
    }
}
