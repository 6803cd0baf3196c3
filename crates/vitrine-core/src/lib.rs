// Copyright 2025 eraflo
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

//! # Vitrine Core
//!
//! Contracts and pure policy for the adaptive rendering-quality subsystem:
//! performance tiers and their settings table, viewport classification, the
//! policy resolver, the performance context, and the visibility-gated mount
//! controller.
//!
//! Concrete host integrations (the wgpu tier prober, the winit viewport
//! source) live in `vitrine-infra`; adaptive renderable components live in
//! `vitrine-scene`.

#![warn(missing_docs)]

pub mod event;
pub mod perf;
pub mod utils;
pub mod visibility;

pub use perf::context::{PerfSnapshot, PerformanceContext};
pub use perf::resolver::EffectiveProfile;
pub use perf::tier::{PerformanceTier, TierSettings};
pub use perf::viewport::ViewportClass;
