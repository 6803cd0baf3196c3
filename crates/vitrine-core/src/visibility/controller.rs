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

use crate::perf::tier::PerformanceTier;
use crate::perf::viewport::ViewportClass;
use crate::utils::timer::DeadlineTimer;
use std::time::{Duration, Instant};

/// Intersection ratio at which a region counts as visible.
pub const INTERSECTION_THRESHOLD: f32 = 0.1;
/// Margin (logical pixels) added around the viewport so content starts
/// loading slightly before it scrolls into view.
pub const LEAD_MARGIN_PX: f32 = 200.0;
/// Grace period before an off-screen region unmounts.
pub const UNMOUNT_GRACE: Duration = Duration::from_millis(1000);
/// Longer grace on low-tier devices, where remounting is costly enough that
/// jittery scrolling must not thrash.
pub const UNMOUNT_GRACE_LOW_TIER: Duration = Duration::from_millis(2000);

/// Lifecycle state of one renderable region's expensive subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    /// The subtree does not exist.
    Unmounted,
    /// Visible but not yet confirmed stable. Reserved: mounting is currently
    /// immediate on intersection, so this state is never entered.
    MountPending,
    /// The subtree is instantiated.
    Mounted,
    /// The region left view; the grace timer is running and re-entry cancels
    /// the pending unmount.
    UnmountPending,
}

/// Static configuration for one observed region.
#[derive(Debug, Clone)]
pub struct RegionConfig {
    /// Name used in diagnostics.
    pub label: String,
    /// Intersection ratio that counts as visible.
    pub threshold: f32,
    /// Lead margin in logical pixels.
    pub lead_margin: f32,
    /// Priority regions mount immediately, regardless of visibility.
    pub priority: bool,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            label: "region".to_string(),
            threshold: INTERSECTION_THRESHOLD,
            lead_margin: LEAD_MARGIN_PX,
            priority: false,
        }
    }
}

impl RegionConfig {
    /// A default configuration with a diagnostic label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Marks the region as priority (mount immediately).
    pub fn with_priority(mut self) -> Self {
        self.priority = true;
        self
    }
}

/// The two visibility signals a renderable consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityState {
    /// Instantaneous intersection with the (expanded) viewport.
    pub is_intersecting: bool,
    /// Whether the expensive subtree should currently exist. Stays `true`
    /// through the grace window after intersection ends.
    pub should_mount: bool,
}

/// Decides whether one region's expensive subtree should exist.
///
/// Driven by intersection ratios (from a host observer or the pure
/// [`intersection_ratio`] helper) and polled for grace-timer expiry. All
/// transitions are synchronous; the grace timer is the only pending action
/// and re-entering view cancels it.
#[derive(Debug)]
pub struct VisibilityController {
    config: RegionConfig,
    state: RegionState,
    intersecting: bool,
    grace: DeadlineTimer,
}

impl VisibilityController {
    /// Creates the controller for a region in the given environment.
    ///
    /// Starts `Mounted` for priority regions and on high-tier desktops
    /// (such devices will not struggle, so there is no reason to wait for
    /// visibility); starts `Unmounted` otherwise.
    pub fn new(config: RegionConfig, tier: PerformanceTier, viewport: ViewportClass) -> Self {
        let eager =
            config.priority || (tier == PerformanceTier::High && viewport.is_desktop());
        let state = if eager {
            log::debug!("Region '{}' mounting eagerly.", config.label);
            RegionState::Mounted
        } else {
            RegionState::Unmounted
        };
        Self {
            config,
            state,
            intersecting: eager,
            grace: DeadlineTimer::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// The region's diagnostic label.
    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// The visibility signals for the associated renderable.
    pub fn visibility(&self) -> VisibilityState {
        VisibilityState {
            is_intersecting: self.intersecting,
            should_mount: matches!(
                self.state,
                RegionState::Mounted | RegionState::UnmountPending
            ),
        }
    }

    /// Feeds a new intersection ratio.
    ///
    /// `tier` selects the grace period ([`UNMOUNT_GRACE_LOW_TIER`] on Low).
    ///
    /// ## Returns
    /// The new state when the observation caused a transition.
    pub fn observe(
        &mut self,
        ratio: f32,
        tier: PerformanceTier,
        now: Instant,
    ) -> Option<RegionState> {
        self.intersecting = ratio >= self.config.threshold;
        match (self.state, self.intersecting) {
            (RegionState::Unmounted | RegionState::MountPending, true) => {
                log::debug!(
                    "Region '{}' entered view (ratio {ratio:.2}); mounting.",
                    self.config.label
                );
                self.state = RegionState::Mounted;
                Some(self.state)
            }
            (RegionState::Mounted, false) => {
                let grace = if tier == PerformanceTier::Low {
                    UNMOUNT_GRACE_LOW_TIER
                } else {
                    UNMOUNT_GRACE
                };
                log::trace!(
                    "Region '{}' left view; unmount in {:?} unless it returns.",
                    self.config.label,
                    grace
                );
                self.grace.arm(now, grace);
                self.state = RegionState::UnmountPending;
                Some(self.state)
            }
            (RegionState::UnmountPending, true) => {
                log::trace!(
                    "Region '{}' re-entered view; pending unmount cancelled.",
                    self.config.label
                );
                self.grace.cancel();
                self.state = RegionState::Mounted;
                Some(self.state)
            }
            _ => None,
        }
    }

    /// Checks the grace timer.
    ///
    /// ## Returns
    /// `Some(RegionState::Unmounted)` when the grace period expired and the
    /// subtree should be torn down.
    pub fn poll(&mut self, now: Instant) -> Option<RegionState> {
        if self.state == RegionState::UnmountPending && self.grace.fire(now) {
            log::debug!(
                "Region '{}' grace period expired; unmounting.",
                self.config.label
            );
            self.state = RegionState::Unmounted;
            return Some(self.state);
        }
        None
    }
}

/// Computes the fraction of a region overlapping the lead-expanded viewport.
///
/// A pure helper for hosts without a native intersection observer: the
/// viewport spans `[scroll_top, scroll_top + viewport_height]` along the
/// scroll axis, expanded by `lead_margin` on both sides; the region spans
/// `[region_top, region_top + region_height]` in the same document
/// coordinates. Degenerate (zero-height) regions yield 0.0.
pub fn intersection_ratio(
    region_top: f32,
    region_height: f32,
    scroll_top: f32,
    viewport_height: f32,
    lead_margin: f32,
) -> f32 {
    if region_height <= 0.0 {
        return 0.0;
    }
    let view_start = scroll_top - lead_margin;
    let view_end = scroll_top + viewport_height + lead_margin;
    let region_end = region_top + region_height;
    let overlap = (region_end.min(view_end) - region_top.max(view_start)).max(0.0);
    overlap / region_height
}
