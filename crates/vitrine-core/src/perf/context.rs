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

//! The shared performance context.
//!
//! One `PerformanceContext` is constructed at application start and passed
//! explicitly to everything that needs it; there is no ambient singleton.
//! It owns the cached probe result, the viewport classifier, the user
//! override, and the "3D assets enabled" toggle; it memoizes the resolved
//! profile and broadcasts an immutable [`PerfSnapshot`] whenever the result
//! actually changes.

use crate::event::SnapshotBus;
use crate::perf::probe::{GpuProbeResult, PowerHint};
use crate::perf::resolver::{resolve, EffectiveProfile};
use crate::perf::tier::PerformanceTier;
use crate::perf::viewport::{ViewportClass, ViewportClassifier};
use serde::Serialize;
use std::time::Instant;

/// An immutable view of the resolved performance state.
///
/// Readers treat a snapshot as frozen per revision and wait for the next
/// publication rather than mutating it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerfSnapshot {
    /// The resolved tier and settings bundle.
    pub profile: EffectiveProfile,
    /// The viewport class the profile was resolved against.
    pub viewport: ViewportClass,
    /// When `false`, every renderable must take its 2D/placeholder path
    /// regardless of tier.
    pub assets_3d_enabled: bool,
    /// Whether the tier came from an explicit user override.
    pub has_override: bool,
    /// `true` until the GPU probe has resolved (the profile then reflects
    /// the medium-while-loading default).
    pub loading: bool,
    /// Monotonic revision counter; bumps exactly when any other field
    /// changes.
    pub revision: u64,
}

impl PerfSnapshot {
    /// Convenience accessor for the low-tier check renderables make often.
    pub fn is_low_tier(&self) -> bool {
        self.profile.tier == PerformanceTier::Low
    }
}

/// Owns every input of the policy resolver and the memoized result.
///
/// Single writer, many readers: mutating methods recompute the snapshot and
/// publish it on the internal bus only when it differs from the previous
/// revision.
pub struct PerformanceContext {
    probe: Option<GpuProbeResult>,
    power: Option<PowerHint>,
    viewport: ViewportClassifier,
    override_tier: Option<PerformanceTier>,
    assets_3d_enabled: bool,
    snapshot: PerfSnapshot,
    bus: SnapshotBus<PerfSnapshot>,
}

impl PerformanceContext {
    /// Creates the context from the construction-time viewport width.
    ///
    /// The initial profile uses the medium-while-loading default until
    /// [`set_probe_result`](Self::set_probe_result) delivers the probe.
    pub fn new(initial_width: Option<u32>) -> Self {
        let viewport = ViewportClassifier::new(initial_width);
        let profile = resolve(None, viewport.current(), None, None);
        let snapshot = PerfSnapshot {
            profile,
            viewport: viewport.current(),
            assets_3d_enabled: true,
            has_override: false,
            loading: true,
            revision: 0,
        };
        log::info!(
            "Performance context initialized (viewport: {:?}, tier while loading: {}).",
            snapshot.viewport,
            snapshot.profile.tier
        );
        Self {
            probe: None,
            power: None,
            viewport,
            override_tier: None,
            assets_3d_enabled: true,
            snapshot,
            bus: SnapshotBus::new(),
        }
    }

    /// The snapshot currently in effect.
    pub fn snapshot(&self) -> &PerfSnapshot {
        &self.snapshot
    }

    /// Raw diagnostics from the probe, once it has resolved.
    pub fn gpu_info(&self) -> Option<&GpuProbeResult> {
        self.probe.as_ref()
    }

    /// Registers a subscriber; it receives a snapshot on every change and
    /// unsubscribes by dropping the receiver.
    pub fn subscribe(&mut self) -> flume::Receiver<PerfSnapshot> {
        self.bus.subscribe()
    }

    /// Delivers the one-shot probe result.
    ///
    /// The first delivery wins for the whole session; later calls are
    /// ignored, which makes re-invocation idempotent.
    pub fn set_probe_result(&mut self, result: GpuProbeResult) -> bool {
        if self.probe.is_some() {
            log::debug!("Ignoring repeated GPU probe delivery; session result is cached.");
            return false;
        }
        log::info!(
            "GPU probe resolved: coarse tier {} ({:?}).",
            result.coarse_tier,
            result.kind
        );
        self.probe = Some(result);
        self.recompute()
    }

    /// Supplies (or clears) the host power hint.
    pub fn set_power_hint(&mut self, hint: Option<PowerHint>) -> bool {
        if self.power == hint {
            return false;
        }
        self.power = hint;
        self.recompute()
    }

    /// Notes a viewport resize event; the change lands after the debounce
    /// quiet period via [`poll`](Self::poll).
    pub fn on_resize(&mut self, width: u32, now: Instant) {
        self.viewport.on_resize(width, now);
    }

    /// Advances debounced state.
    ///
    /// ## Returns
    /// `true` when the snapshot changed (and was published).
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.viewport.poll(now).is_some() {
            self.recompute()
        } else {
            false
        }
    }

    /// Sets or clears the explicit tier override.
    ///
    /// The control offers only the three valid tiers plus `None`, so no
    /// validation is needed here.
    pub fn set_override(&mut self, tier: Option<PerformanceTier>) -> bool {
        if self.override_tier == tier {
            return false;
        }
        match tier {
            Some(tier) => log::info!("Performance tier overridden to {tier} by user."),
            None => log::info!("Performance tier override cleared."),
        }
        self.override_tier = tier;
        self.recompute()
    }

    /// Toggles 3D asset rendering wholesale.
    ///
    /// When disabled, every renderable takes its 2D/placeholder path no
    /// matter the tier.
    pub fn set_assets_3d_enabled(&mut self, enabled: bool) -> bool {
        if self.assets_3d_enabled == enabled {
            return false;
        }
        log::info!("3D assets {}.", if enabled { "enabled" } else { "disabled" });
        self.assets_3d_enabled = enabled;
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let profile = resolve(
            self.probe.as_ref(),
            self.viewport.current(),
            self.override_tier,
            self.power,
        );
        let candidate = PerfSnapshot {
            profile,
            viewport: self.viewport.current(),
            assets_3d_enabled: self.assets_3d_enabled,
            has_override: self.override_tier.is_some(),
            loading: self.probe.is_none(),
            revision: self.snapshot.revision,
        };
        if candidate == self.snapshot {
            log::trace!("Profile recomputation produced no change; keeping revision.");
            return false;
        }
        self.snapshot = PerfSnapshot {
            revision: self.snapshot.revision + 1,
            ..candidate
        };
        log::debug!(
            "Effective profile updated (rev {}): tier {}, viewport {:?}.",
            self.snapshot.revision,
            self.snapshot.profile.tier,
            self.snapshot.viewport
        );
        self.bus.publish(&self.snapshot);
        true
    }
}
