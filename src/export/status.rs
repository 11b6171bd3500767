//! Human-facing status for an export run.

use super::run::{ExportOutcome, ExportRun, RunState};
use crate::utils::{plural_count, plural_s};

/// How a status message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Project a run into its status line. `Idle` has none.
///
/// # Examples
///
/// - running: `processing 2/5: logo.svg` (info)
/// - all exported: `exported 5 files` (success)
/// - partial: `exported 4 of 5 files, 1 failure: bad.svg` (warning)
pub fn report(run: &ExportRun) -> Option<StatusMessage> {
    match run.state {
        RunState::Idle => None,
        RunState::Running => Some(StatusMessage::new(Severity::Info, progress_text(run))),
        RunState::Done => Some(summary(run)),
        RunState::Error => Some(StatusMessage::new(
            Severity::Error,
            run.error.as_deref().unwrap_or("export failed"),
        )),
    }
}

fn progress_text(run: &ExportRun) -> String {
    // 1-based index of the item in flight, or of the last settled item
    let index = match run.current {
        Some(_) => run.processed + 1,
        None => run.processed,
    }
    .clamp(1, run.total.max(1));

    match &run.current {
        Some(name) => format!("processing {index}/{}: {name}", run.total),
        None => format!("processing {index}/{}", run.total),
    }
}

fn summary(run: &ExportRun) -> StatusMessage {
    let succeeded = run.succeeded();
    let failed: Vec<&str> = run.failures().map(ExportOutcome::name).collect();

    if failed.is_empty() {
        return StatusMessage::new(
            Severity::Success,
            format!("exported {}", plural_count(succeeded, "file")),
        );
    }

    let severity = if succeeded == 0 {
        Severity::Error
    } else {
        Severity::Warning
    };
    let text = format!(
        "exported {succeeded} of {} file{}, {}: {}",
        run.total,
        plural_s(run.total),
        plural_count(failed.len(), "failure"),
        failed.join(", ")
    );
    StatusMessage::new(severity, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(name: &str) -> ExportOutcome {
        ExportOutcome::Success {
            name: name.into(),
            file: crate::export::output_name(name),
            byte_size: 42,
        }
    }

    fn failure(name: &str) -> ExportOutcome {
        ExportOutcome::Failure {
            name: name.into(),
            reason: "invalid input: document is empty".into(),
        }
    }

    fn finished(outcomes: Vec<ExportOutcome>) -> ExportRun {
        let mut run = ExportRun::default();
        run.start(outcomes.len());
        for outcome in outcomes {
            run.record(outcome);
        }
        run.finish();
        run
    }

    #[test]
    fn test_idle_has_no_status() {
        assert_eq!(report(&ExportRun::default()), None);
    }

    #[test]
    fn test_running_progress() {
        let mut run = ExportRun::default();
        run.start(3);
        run.record(success("a.svg"));
        run.begin("b.svg");

        let status = report(&run).unwrap();
        assert_eq!(status.severity, Severity::Info);
        assert_eq!(status.text, "processing 2/3: b.svg");
    }

    #[test]
    fn test_running_between_items() {
        let mut run = ExportRun::default();
        run.start(2);
        assert_eq!(report(&run).unwrap().text, "processing 1/2");
    }

    #[test]
    fn test_all_succeeded() {
        let status = report(&finished(vec![success("a.svg"), success("b.svg")])).unwrap();
        assert_eq!(status.severity, Severity::Success);
        assert_eq!(status.text, "exported 2 files");

        let status = report(&finished(vec![success("a.svg")])).unwrap();
        assert_eq!(status.text, "exported 1 file");
    }

    #[test]
    fn test_partial_failure() {
        let run = finished(vec![success("a.svg"), failure("b.svg"), success("c.svg")]);
        let status = report(&run).unwrap();
        assert_eq!(status.severity, Severity::Warning);
        assert_eq!(status.text, "exported 2 of 3 files, 1 failure: b.svg");
    }

    #[test]
    fn test_everything_failed() {
        let run = finished(vec![failure("a.svg"), failure("b.svg")]);
        let status = report(&run).unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert_eq!(status.text, "exported 0 of 2 files, 2 failures: a.svg, b.svg");
    }

    #[test]
    fn test_fatal_error() {
        let mut run = ExportRun::default();
        run.start(1);
        run.fail("export failed: render failed: unexpected end of stream");

        let status = report(&run).unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert_eq!(
            status.text,
            "export failed: render failed: unexpected end of stream"
        );
    }
}
