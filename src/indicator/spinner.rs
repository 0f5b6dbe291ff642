// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::indicator::ProgressIndicator;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg}";

pub struct SpinnerProgress {
    progress_bar: Option<ProgressBar>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self { progress_bar: None }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressIndicator for SpinnerProgress {
    fn start(&mut self, message: String) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template(TEMPLATE) {
            pb.set_style(style.tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷"));
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        self.progress_bar = Some(pb);
    }

    fn set_message(&mut self, message: String) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(message);
        }
    }

    fn complete(&mut self, message: Option<String>) {
        if let Some(pb) = self.progress_bar.take() {
            match message {
                Some(msg) => pb.finish_with_message(msg),
                None => pb.finish_and_clear(),
            }
        }
    }

    fn error(&mut self, message: String) {
        if let Some(pb) = self.progress_bar.take() {
            pb.abandon_with_message(format!("✗ {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let mut progress = SpinnerProgress::new();
        assert!(progress.progress_bar.is_none());

        progress.start("Fetching manifest".to_string());
        assert!(progress.progress_bar.is_some());

        progress.set_message("Fetching resource index".to_string());
        progress.complete(Some("Done".to_string()));
        assert!(progress.progress_bar.is_none());
    }

    #[test]
    fn test_error_before_start_is_noop() {
        let mut progress = SpinnerProgress::new();
        progress.error("nothing started".to_string());
        assert!(progress.progress_bar.is_none());
    }
}
