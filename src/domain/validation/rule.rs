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

use crate::shared::error::Result;

/// How a failed rule affects the overall validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    /// Failure aborts validation with an error.
    Error,
    /// Failure is reported but tolerated.
    Warning,
}

impl std::fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationLevel::Error => f.write_str("error"),
            ValidationLevel::Warning => f.write_str("warning"),
        }
    }
}

/// A single environment check run by the validator.
#[async_trait::async_trait]
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    async fn verify(&self) -> Result<()>;

    /// Shown when `verify` succeeds.
    fn message(&self) -> &str;

    fn level(&self) -> ValidationLevel;

    /// Remediation shown when `verify` fails.
    fn hint(&self) -> &str;
}
