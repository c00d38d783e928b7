//! Message dispatch metrics.

use metrics::{counter, histogram};
use std::time::Instant;

/// Dispatch metrics recorder
pub struct DispatchMetrics;

impl DispatchMetrics {
    /// Record a handled slash command
    pub fn record_command(command: &str) {
        counter!("assistant_commands_total", "command" => command.to_string()).increment(1);
    }

    /// Record a classified free-text message
    pub fn record_intent(intent: &str) {
        counter!("assistant_intents_total", "intent" => intent.to_string()).increment(1);
    }

    /// Record one collaborator call with its outcome (`ok`, `error`, `timeout`)
    pub fn record_collaborator_call(collaborator: &str, outcome: &str, duration_secs: f64) {
        counter!(
            "assistant_collaborator_calls_total",
            "collaborator" => collaborator.to_string(),
            "outcome" => outcome.to_string()
        )
        .increment(1);

        histogram!(
            "assistant_collaborator_duration_seconds",
            "collaborator" => collaborator.to_string()
        )
        .record(duration_secs);
    }
}

/// Timer guard for a collaborator call.
///
/// Records with the outcome passed to `stop()`, or as `cancelled` when
/// dropped before being stopped.
pub struct CollaboratorTimer {
    start: Instant,
    collaborator: &'static str,
    stopped: bool,
}

impl CollaboratorTimer {
    pub fn start(collaborator: &'static str) -> Self {
        Self {
            start: Instant::now(),
            collaborator,
            stopped: false,
        }
    }

    /// Stop the timer and record the call. Returns the elapsed seconds.
    pub fn stop(&mut self, outcome: &str) -> f64 {
        if self.stopped {
            return 0.0;
        }
        self.stopped = true;

        let elapsed = self.start.elapsed().as_secs_f64();
        DispatchMetrics::record_collaborator_call(self.collaborator, outcome, elapsed);
        elapsed
    }
}

impl Drop for CollaboratorTimer {
    fn drop(&mut self) {
        if !self.stopped {
            self.stop("cancelled");
        }
    }
}
