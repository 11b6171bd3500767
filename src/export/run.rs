//! Export run state.
//!
//! ```text
//! Idle ──start──► Running ──finish──► Done
//!                    │
//!                    └────fail─────► Error
//! ```
//!
//! `Done` and `Error` are terminal until the next `start`.

/// Lifecycle state of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Done,
    Error,
}

impl RunState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// Result of exporting one document. Never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Success {
        /// Source document name.
        name: String,
        /// Delivered file name (`<stem>.png`).
        file: String,
        byte_size: usize,
    },
    Failure {
        /// Source document name.
        name: String,
        reason: String,
    },
}

impl ExportOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Success { name, .. } | Self::Failure { name, .. } => name,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Progress and results of one single or batch export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRun {
    pub state: RunState,
    /// Items settled so far.
    pub processed: usize,
    pub total: usize,
    /// Name of the item in flight.
    pub current: Option<String>,
    pub outcomes: Vec<ExportOutcome>,
    /// Fatal error message, set in the `Error` state.
    pub error: Option<String>,
}

impl ExportRun {
    /// Reset into `Running` for a queue of `total` items.
    pub fn start(&mut self, total: usize) {
        *self = Self {
            state: RunState::Running,
            total,
            outcomes: Vec::with_capacity(total),
            ..Self::default()
        };
    }

    /// Mark `name` as the item in flight.
    pub fn begin(&mut self, name: &str) {
        self.current = Some(name.to_string());
    }

    /// Record a settled item.
    pub fn record(&mut self, outcome: ExportOutcome) {
        self.outcomes.push(outcome);
        self.processed += 1;
    }

    /// Finish normally, whatever the per-item outcomes.
    pub fn finish(&mut self) {
        self.state = RunState::Done;
        self.current = None;
    }

    /// Abort with a fatal error.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = RunState::Error;
        self.current = None;
        self.error = Some(message.into());
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ExportOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Check if a finished run exported every item.
    pub fn all_succeeded(&self) -> bool {
        self.state == RunState::Done && self.succeeded() == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(name: &str) -> ExportOutcome {
        ExportOutcome::Success {
            name: name.to_string(),
            file: name.replace(".svg", ".png"),
            byte_size: 10,
        }
    }

    fn failure(name: &str) -> ExportOutcome {
        ExportOutcome::Failure {
            name: name.to_string(),
            reason: "render failed".to_string(),
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut run = ExportRun::default();
        assert_eq!(run.state, RunState::Idle);

        run.start(2);
        assert_eq!(run.state, RunState::Running);
        run.begin("a.svg");
        assert_eq!(run.current.as_deref(), Some("a.svg"));
        run.record(success("a.svg"));
        run.begin("b.svg");
        run.record(failure("b.svg"));
        run.finish();

        assert_eq!(run.state, RunState::Done);
        assert_eq!(run.processed, 2);
        assert_eq!(run.current, None);
        assert_eq!(run.succeeded(), 1);
        assert_eq!(run.failures().map(ExportOutcome::name).collect::<Vec<_>>(), ["b.svg"]);
        assert!(!run.all_succeeded());
    }

    #[test]
    fn test_start_resets_previous_run() {
        let mut run = ExportRun::default();
        run.start(1);
        run.record(failure("x.svg"));
        run.fail("boom");
        assert!(run.state.is_terminal());

        run.start(3);
        assert_eq!(run.state, RunState::Running);
        assert_eq!(run.total, 3);
        assert!(run.outcomes.is_empty());
        assert_eq!(run.error, None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RunState::Idle.is_terminal());
        assert!(!RunState::Running.is_terminal());
        assert!(RunState::Done.is_terminal());
        assert!(RunState::Error.is_terminal());
    }
}
