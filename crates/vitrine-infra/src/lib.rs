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

//! # Vitrine Infra
//!
//! Concrete implementations of the host-environment seams declared in
//! `vitrine-core`: a wgpu-backed GPU tier prober (with a bounded timeout and
//! silent fallback) and a winit-backed viewport source.

#![warn(missing_docs)]

pub mod gpu;
pub mod platform;

pub use gpu::{BoundedProber, WgpuTierProber, PROBE_TIMEOUT};
pub use platform::{platform_mobile_hint, WinitViewport};
