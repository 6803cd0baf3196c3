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

//! GPU capability probing contracts.
//!
//! The concrete prober lives in `vitrine-infra`; this module defines the
//! backend-agnostic result type and the async trait the infra crate
//! implements. A probe runs once per session and must never surface an error:
//! any internal failure resolves to [`GpuProbeResult::fallback`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Coarse tier assigned to a probe that could not run.
///
/// Maps to the Medium performance tier, the safe middle ground.
pub const FALLBACK_COARSE_TIER: u8 = 2;

/// How a probe result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// The capability benchmark actually ran.
    Benchmark,
    /// The benchmark failed, hung, or was unsupported; this is the canned
    /// fallback.
    Fallback,
}

/// Result of the one-shot GPU capability probe.
///
/// Created once per session, cached by the performance context, and immutable
/// thereafter; there is no re-probing on later evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuProbeResult {
    /// Coarse capability estimate, 0-3, lower is weaker.
    pub coarse_tier: u8,
    /// Whether the host looks like a mobile device.
    pub is_mobile: bool,
    /// How this result was obtained.
    pub kind: ProbeKind,
    /// Free-form diagnostic payload (adapter name, backend, failure reason).
    pub diagnostics: String,
}

impl GpuProbeResult {
    /// The canned result used when the probe fails or times out.
    ///
    /// ## Arguments
    /// * `reason` - Diagnostic text recording why the benchmark did not run.
    pub fn fallback(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log::warn!("GPU detection failed, using fallback tier: {reason}");
        Self {
            coarse_tier: FALLBACK_COARSE_TIER,
            is_mobile: false,
            kind: ProbeKind::Fallback,
            diagnostics: reason,
        }
    }

    /// Returns `true` if this is the canned fallback rather than a measured
    /// result.
    pub fn is_fallback(&self) -> bool {
        self.kind == ProbeKind::Fallback
    }
}

/// Host power state, supplied by the platform layer when available.
///
/// Feeding this into the resolver demotes the tier on weak batteries; passing
/// `None` disables the behavior entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerHint {
    /// Running from wall power or charging.
    PluggedIn,
    /// Discharging, with the remaining charge as a 0.0-1.0 fraction.
    Discharging {
        /// Remaining battery charge fraction.
        level: f32,
    },
}

/// A one-shot, infallible-by-contract GPU tier probe.
///
/// Implementations must resolve rather than error: on any internal failure
/// they return [`GpuProbeResult::fallback`]. Callers invoke `probe` once per
/// session; the performance context caches the result.
#[async_trait]
pub trait GpuTierProber: Send + Sync {
    /// Runs the capability probe.
    async fn probe(&self) -> GpuProbeResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_carries_marker_and_medium_coarse_tier() {
        let result = GpuProbeResult::fallback("benchmark rejected");
        assert!(result.is_fallback());
        assert_eq!(result.coarse_tier, FALLBACK_COARSE_TIER);
        assert!(!result.is_mobile);
        assert!(result.diagnostics.contains("rejected"));
    }

    #[test]
    fn measured_result_is_not_fallback() {
        let result = GpuProbeResult {
            coarse_tier: 3,
            is_mobile: false,
            kind: ProbeKind::Benchmark,
            diagnostics: "discrete adapter".to_string(),
        };
        assert!(!result.is_fallback());
    }
}
