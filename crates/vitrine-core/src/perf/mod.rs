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

//! The adaptive-performance policy: tiers, probing contracts, viewport
//! classification, resolution, and the shared context.
//!
//! Data flows one way: the GPU prober and the viewport classifier feed the
//! [`resolver`](crate::perf::resolver), together with an optional user
//! override; the [`PerformanceContext`](crate::perf::context::PerformanceContext)
//! memoizes the result and broadcasts it to consumers.

pub mod context;
pub mod probe;
pub mod resolver;
pub mod tier;
pub mod viewport;

pub use context::{PerfSnapshot, PerformanceContext};
pub use probe::{GpuProbeResult, GpuTierProber, PowerHint, ProbeKind};
pub use resolver::{resolve, EffectiveProfile};
pub use tier::{FrameloopPolicy, PerformanceTier, PrecisionClass, TierSettings};
pub use viewport::{ViewportClass, ViewportClassifier, ViewportSource};
