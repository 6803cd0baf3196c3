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

//! The shared rendering-decision contract for adaptive visuals.

use crate::asset::LoadState;
use vitrine_core::perf::context::PerfSnapshot;
use vitrine_core::perf::tier::FrameloopPolicy;
use vitrine_core::visibility::VisibilityState;

/// How a component should be drawn right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Lightweight skeleton placeholder; the expensive subtree does not
    /// exist.
    Skeleton,
    /// The full 3D subtree.
    Scene3d,
    /// The 2D static image stand-in. No 3D context is created at all; on
    /// constrained devices this is the single most effective lever in the
    /// subsystem.
    Flat2d,
    /// Generic placeholder mesh shown while (or because) the model is
    /// unavailable.
    PlaceholderMesh,
    /// Inline initials badge, the last resort when the 2D image itself
    /// failed.
    InitialsBadge,
}

/// Picks the render path for one component.
///
/// `has_flat_asset` says whether a 2D stand-in exists; `model` and `image`
/// are the load states of the 3D model and the 2D image respectively.
///
/// Decision order:
/// 1. An unmounted region renders only the skeleton.
/// 2. Mobile viewport, Low tier, or the 3D toggle being off prefer the 2D
///    path when one exists (initials badge if that image failed). With the
///    toggle off, 3D is never entered even without a 2D asset.
/// 3. Otherwise the 3D path: placeholder mesh while loading; on model
///    failure, the 2D image when available, else the placeholder mesh.
pub fn select_render_path(
    snapshot: &PerfSnapshot,
    visibility: VisibilityState,
    model: LoadState,
    image: LoadState,
    has_flat_asset: bool,
) -> RenderPath {
    if !visibility.should_mount {
        return RenderPath::Skeleton;
    }

    let prefer_flat =
        !snapshot.assets_3d_enabled || snapshot.viewport.is_mobile() || snapshot.is_low_tier();
    if prefer_flat {
        if has_flat_asset {
            return if image == LoadState::Failed {
                RenderPath::InitialsBadge
            } else {
                RenderPath::Flat2d
            };
        }
        if !snapshot.assets_3d_enabled {
            return RenderPath::InitialsBadge;
        }
    }

    match model {
        LoadState::Ready => RenderPath::Scene3d,
        LoadState::Loading => RenderPath::PlaceholderMesh,
        LoadState::Failed => {
            if has_flat_asset && image != LoadState::Failed {
                RenderPath::Flat2d
            } else {
                RenderPath::PlaceholderMesh
            }
        }
    }
}

/// Picks the frame-loop cadence for one component.
///
/// Off-screen or Low-tier content renders only on invalidation; everything
/// else follows the tier settings.
pub fn effective_frameloop(
    snapshot: &PerfSnapshot,
    visibility: VisibilityState,
) -> FrameloopPolicy {
    if !visibility.is_intersecting || snapshot.is_low_tier() {
        FrameloopPolicy::Demand
    } else {
        snapshot.profile.settings.frameloop
    }
}

/// An expensive visual that adapts to the performance snapshot and its
/// region's visibility.
pub trait AdaptiveVisual {
    /// Re-derives all rendering decisions from fresh inputs.
    fn apply(&mut self, snapshot: &PerfSnapshot, visibility: VisibilityState);

    /// The path the renderer should take for this component.
    fn render_path(&self) -> RenderPath;

    /// The frame-loop cadence this component wants.
    fn frameloop(&self) -> FrameloopPolicy;
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::perf::probe::{GpuProbeResult, ProbeKind};
    use vitrine_core::perf::resolver::resolve;
    use vitrine_core::perf::tier::PerformanceTier;
    use vitrine_core::perf::viewport::ViewportClass;

    fn snapshot(coarse_tier: u8, viewport: ViewportClass) -> PerfSnapshot {
        let probe = GpuProbeResult {
            coarse_tier,
            is_mobile: false,
            kind: ProbeKind::Benchmark,
            diagnostics: String::new(),
        };
        PerfSnapshot {
            profile: resolve(Some(&probe), viewport, None, None),
            viewport,
            assets_3d_enabled: true,
            has_override: false,
            loading: false,
            revision: 1,
        }
    }

    fn mounted() -> VisibilityState {
        VisibilityState {
            is_intersecting: true,
            should_mount: true,
        }
    }

    fn unmounted() -> VisibilityState {
        VisibilityState {
            is_intersecting: false,
            should_mount: false,
        }
    }

    #[test]
    fn unmounted_regions_render_skeletons_only() {
        let snap = snapshot(3, ViewportClass::Desktop);
        let path = select_render_path(&snap, unmounted(), LoadState::Ready, LoadState::Ready, true);
        assert_eq!(path, RenderPath::Skeleton);
    }

    #[test]
    fn mobile_takes_the_flat_path_even_with_a_strong_gpu() {
        let snap = snapshot(3, ViewportClass::Mobile);
        let path = select_render_path(&snap, mounted(), LoadState::Ready, LoadState::Ready, true);
        assert_eq!(path, RenderPath::Flat2d);
    }

    #[test]
    fn low_tier_takes_the_flat_path() {
        let snap = snapshot(0, ViewportClass::Desktop);
        assert_eq!(snap.profile.tier, PerformanceTier::Low);
        let path = select_render_path(&snap, mounted(), LoadState::Ready, LoadState::Ready, true);
        assert_eq!(path, RenderPath::Flat2d);
    }

    #[test]
    fn low_tier_without_flat_asset_still_renders_3d() {
        let snap = snapshot(0, ViewportClass::Desktop);
        let path = select_render_path(&snap, mounted(), LoadState::Ready, LoadState::Ready, false);
        assert_eq!(path, RenderPath::Scene3d);
    }

    #[test]
    fn disabled_3d_toggle_never_reaches_the_3d_path() {
        let mut snap = snapshot(3, ViewportClass::Desktop);
        snap.assets_3d_enabled = false;

        let with_flat =
            select_render_path(&snap, mounted(), LoadState::Ready, LoadState::Ready, true);
        assert_eq!(with_flat, RenderPath::Flat2d);

        let without_flat =
            select_render_path(&snap, mounted(), LoadState::Ready, LoadState::Ready, false);
        assert_eq!(without_flat, RenderPath::InitialsBadge);
    }

    #[test]
    fn broken_flat_image_swaps_in_the_initials_badge() {
        let snap = snapshot(0, ViewportClass::Desktop);
        let path = select_render_path(&snap, mounted(), LoadState::Ready, LoadState::Failed, true);
        assert_eq!(path, RenderPath::InitialsBadge);
    }

    #[test]
    fn model_lifecycle_on_the_3d_path() {
        let snap = snapshot(3, ViewportClass::Desktop);
        for (model, expected) in [
            (LoadState::Loading, RenderPath::PlaceholderMesh),
            (LoadState::Ready, RenderPath::Scene3d),
            (LoadState::Failed, RenderPath::Flat2d),
        ] {
            let path = select_render_path(&snap, mounted(), model, LoadState::Ready, true);
            assert_eq!(path, expected, "model state {model:?}");
        }
        // Failed model with no 2D stand-in keeps the placeholder mesh.
        let path =
            select_render_path(&snap, mounted(), LoadState::Failed, LoadState::Ready, false);
        assert_eq!(path, RenderPath::PlaceholderMesh);
    }

    #[test]
    fn offscreen_and_low_tier_degrade_to_demand_rendering() {
        let high = snapshot(3, ViewportClass::Desktop);
        assert_eq!(effective_frameloop(&high, mounted()), FrameloopPolicy::Always);

        let offscreen = VisibilityState {
            is_intersecting: false,
            should_mount: true,
        };
        assert_eq!(
            effective_frameloop(&high, offscreen),
            FrameloopPolicy::Demand
        );

        let low = snapshot(0, ViewportClass::Desktop);
        assert_eq!(effective_frameloop(&low, mounted()), FrameloopPolicy::Demand);
    }
}
