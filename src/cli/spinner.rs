// Copyright 2025 JiangLong.
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

//! Progress spinner for long-running CLI steps

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

const TICK: Duration = Duration::from_millis(100);

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn new(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.into());
        Self { bar }
    }

    pub fn start(&self) {
        self.bar.enable_steady_tick(TICK);
    }

    pub fn update_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    pub fn stop(&self, message: &str) {
        self.finish(format!("{} {}", "✔".green(), message));
    }

    pub fn fail(&self, message: &str) {
        self.finish(format!("{} {}", "✖".red(), message));
    }

    pub fn stop_with_hint(&self, message: &str, hint: &str) {
        self.fail(message);
        info!("HINT: {}", hint);
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    fn finish(&self, line: String) {
        self.bar.finish_and_clear();
        eprintln!("{}", line);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
