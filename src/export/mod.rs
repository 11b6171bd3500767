//! SVG to PNG export pipeline.
//!
//! # Modules
//!
//! | Module         | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `document`     | `SourceDocument` and `<stem>.png` naming         |
//! | `ingest`       | File/pasted-text ingestion with validation       |
//! | `preset`       | Common export sizes                              |
//! | `target`       | `ExportTarget` with aspect-ratio locking         |
//! | `run`          | `ExportRun` state machine and outcomes           |
//! | `orchestrator` | Single and batch export                          |
//! | `sink`         | Output sinks (directory, memory)                 |
//! | `status`       | Run → status line projection                     |

mod document;
pub mod ingest;
mod orchestrator;
mod preset;
mod run;
mod sink;
mod status;
mod target;

pub use document::{SourceDocument, output_name};
pub use orchestrator::{ExportError, Exporter};
pub use preset::{SIZE_PRESETS, SizePreset, find_preset};
pub use run::{ExportOutcome, ExportRun, RunState};
pub use sink::{DirSink, MemorySink, OutputSink};
pub use status::{Severity, StatusMessage, report};
pub use target::ExportTarget;
