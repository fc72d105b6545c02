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

//! Environment validation rules

pub mod kubeconfig;
pub mod podman;
pub mod rule;
pub mod runner;

pub use self::kubeconfig::KubeconfigRule;
pub use self::podman::{ModelDirectoryRule, PodmanRule};
pub use self::rule::{Rule, ValidationLevel};
pub use self::runner::{RuleOutcome, ValidationReport, ValidationReporter, Validator};
