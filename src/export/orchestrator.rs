//! Single and batch export.
//!
//! Each document goes through validate → rewrite → rasterize → deliver.
//! Batch export is a sequential fold over the queue: item `i + 1` starts
//! only after item `i` has settled, and a failing item is recorded as a
//! [`ExportOutcome::Failure`] without stopping the run.
//!
//! Run snapshots are published on a `watch` channel; the presentation
//! layer subscribes with [`Exporter::subscribe`].

use std::io;

use thiserror::Error;
use tokio::sync::watch;

use super::document::SourceDocument;
use super::run::{ExportOutcome, ExportRun};
use super::sink::OutputSink;
use super::target::ExportTarget;
use crate::debug;
use crate::svg::{Rasterizer, RenderError, rewrite};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to save `{name}`")]
    OutputFailed {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("nothing to export: the queue is empty")]
    EmptyQueue,
}

/// Drives export runs and owns the run state.
pub struct Exporter<S> {
    rasterizer: Rasterizer,
    sink: S,
    run: watch::Sender<ExportRun>,
}

impl<S: OutputSink> Exporter<S> {
    pub fn new(rasterizer: Rasterizer, sink: S) -> Self {
        let (run, _) = watch::channel(ExportRun::default());
        Self {
            rasterizer,
            sink,
            run,
        }
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ExportRun> {
        self.run.subscribe()
    }

    /// Current run snapshot.
    pub fn run(&self) -> ExportRun {
        self.run.borrow().clone()
    }

    /// Back to `Idle`, e.g. after the queue is cleared.
    pub fn reset(&self) {
        self.run.send_replace(ExportRun::default());
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Export one document. Any failure ends the run in `Error`.
    pub async fn export_single(
        &mut self,
        doc: SourceDocument,
        target: &ExportTarget,
    ) -> Result<ExportOutcome, ExportError> {
        self.run.send_modify(|run| {
            run.start(1);
            run.begin(&doc.name);
        });

        match self.export_one(&doc, target).await {
            Ok(outcome) => {
                self.run.send_modify(|run| {
                    run.record(outcome.clone());
                    run.finish();
                });
                Ok(outcome)
            }
            Err(err) => {
                let message = error_chain(&err);
                self.run.send_modify(|run| {
                    run.record(ExportOutcome::Failure {
                        name: doc.name.clone(),
                        reason: message.clone(),
                    });
                    run.fail(format!("export failed: {message}"));
                });
                Err(err)
            }
        }
    }

    /// Export every queued document in order with one target size.
    ///
    /// Per-item errors become `Failure` outcomes; the run always ends in
    /// `Done`. Only an empty queue is an error, and it leaves the run
    /// untouched.
    pub async fn export_batch(
        &mut self,
        queue: Vec<SourceDocument>,
        target: &ExportTarget,
    ) -> Result<ExportRun, ExportError> {
        if queue.is_empty() {
            return Err(ExportError::EmptyQueue);
        }

        self.run.send_modify(|run| run.start(queue.len()));

        for doc in queue {
            self.run.send_modify(|run| run.begin(&doc.name));

            let result = self.export_one(&doc, target).await;
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(err) => {
                    let reason = error_chain(&err);
                    debug!("export"; "{} failed: {}", doc.name, reason);
                    ExportOutcome::Failure {
                        name: doc.name,
                        reason,
                    }
                }
            };

            self.run.send_modify(|run| run.record(outcome));
        }

        self.run.send_modify(ExportRun::finish);
        Ok(self.run())
    }

    async fn export_one(
        &mut self,
        doc: &SourceDocument,
        target: &ExportTarget,
    ) -> Result<ExportOutcome, ExportError> {
        validate_markup(&doc.markup)?;

        let (width, height) = target.size();
        let markup = rewrite(&doc.markup, target.size(), target.style_policy());
        let png = self.rasterizer.rasterize(markup, width, height).await?;

        let file = doc.output_name();
        self.sink
            .deliver(&file, &png)
            .map_err(|source| ExportError::OutputFailed {
                name: file.clone(),
                source,
            })?;

        debug!("export"; "{} -> {} ({} bytes)", doc.name, file, png.len());
        Ok(ExportOutcome::Success {
            name: doc.name.clone(),
            file,
            byte_size: png.len(),
        })
    }
}

/// Reject markup that cannot be an SVG document before rendering.
fn validate_markup(markup: &str) -> Result<(), ExportError> {
    if markup.trim().is_empty() {
        return Err(ExportError::InvalidInput("document is empty".into()));
    }
    if !markup.contains("<svg") && !markup.contains(":svg") {
        return Err(ExportError::InvalidInput(
            "document has no <svg> element".into(),
        ));
    }
    Ok(())
}

/// Error message with its sources appended.
fn error_chain(err: &ExportError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
