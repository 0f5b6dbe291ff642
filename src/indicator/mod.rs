//! Progress feedback for network-bound steps.
//!
//! `SpinnerProgress` animates an indicatif spinner on interactive terminals;
//! `SilentProgress` is used for `--no-progress` and non-terminal stderr.

pub mod silent;
pub mod spinner;

pub use silent::SilentProgress;
pub use spinner::SpinnerProgress;

use std::io::IsTerminal;

/// Core trait for progress indicator implementations
pub trait ProgressIndicator: Send + Sync {
    /// Start an indeterminate operation with an initial message
    fn start(&mut self, message: String);

    /// Replace the message shown next to the indicator
    fn set_message(&mut self, message: String);

    /// Complete the operation successfully
    fn complete(&mut self, message: Option<String>);

    /// Mark the operation as failed
    fn error(&mut self, message: String);
}

/// Pick an indicator for the current environment.
pub fn new_progress(no_progress: bool) -> Box<dyn ProgressIndicator> {
    if no_progress || !std::io::stderr().is_terminal() {
        Box::new(SilentProgress::new())
    } else {
        Box::new(SpinnerProgress::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingProgress {
        events: Vec<String>,
    }

    impl ProgressIndicator for RecordingProgress {
        fn start(&mut self, message: String) {
            self.events.push(format!("start:{message}"));
        }

        fn set_message(&mut self, message: String) {
            self.events.push(format!("message:{message}"));
        }

        fn complete(&mut self, message: Option<String>) {
            self.events
                .push(format!("complete:{}", message.unwrap_or_default()));
        }

        fn error(&mut self, message: String) {
            self.events.push(format!("error:{message}"));
        }
    }

    #[test]
    fn test_trait_object_usage() {
        let mut progress: Box<dyn ProgressIndicator> = Box::new(RecordingProgress::default());
        progress.start("Fetching".to_string());
        progress.set_message("manifest".to_string());
        progress.complete(None);
    }

    #[test]
    fn test_event_order() {
        let mut progress = RecordingProgress::default();
        progress.start("a".to_string());
        progress.error("b".to_string());
        assert_eq!(progress.events, vec!["start:a", "error:b"]);
    }

    #[test]
    fn test_no_progress_flag_is_silent() {
        // Must not panic regardless of terminal state.
        let mut progress = new_progress(true);
        progress.start("quiet".to_string());
        progress.complete(Some("done".to_string()));
    }
}
