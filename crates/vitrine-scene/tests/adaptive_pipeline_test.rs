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

//! End-to-end tests of the adaptive pipeline: probe → context → visibility
//! controllers → renderable components, driven by simulated resize, scroll,
//! and override timelines.

use std::time::{Duration, Instant};
use vitrine_core::perf::context::PerformanceContext;
use vitrine_core::perf::probe::{GpuProbeResult, ProbeKind};
use vitrine_core::perf::tier::{FrameloopPolicy, PerformanceTier};
use vitrine_core::visibility::{
    intersection_ratio, RegionConfig, RegionState, VisibilityController, LEAD_MARGIN_PX,
};
use vitrine_scene::{
    AdaptiveVisual, AssetDescriptor, HeroScene, RenderPath, TechIconCard,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn benchmark_probe(coarse_tier: u8) -> GpuProbeResult {
    GpuProbeResult {
        coarse_tier,
        is_mobile: false,
        kind: ProbeKind::Benchmark,
        diagnostics: "test adapter".to_string(),
    }
}

fn card_descriptor() -> AssetDescriptor {
    AssetDescriptor::new("TypeScript", "/models/typescript.glb")
        .with_flat_image("/images/typescript.webp")
}

#[test]
fn probe_rejection_degrades_to_medium_without_crashing() {
    let mut ctx = PerformanceContext::new(Some(1400));
    ctx.set_probe_result(GpuProbeResult::fallback("adapter enumeration failed"));

    let snap = ctx.snapshot();
    assert!(!snap.loading);
    assert_eq!(snap.profile.tier, PerformanceTier::Medium);
    assert!(ctx.gpu_info().unwrap().is_fallback());
}

#[test]
fn mobile_session_never_instantiates_3d() {
    let mut ctx = PerformanceContext::new(Some(390));
    ctx.set_probe_result(benchmark_probe(3));

    let snap = *ctx.snapshot();
    assert_eq!(snap.profile.tier, PerformanceTier::Low);

    let controller = VisibilityController::new(
        RegionConfig::labeled("skills").with_priority(),
        snap.profile.tier,
        snap.viewport,
    );

    let mut card = TechIconCard::new(card_descriptor());
    card.apply(&snap, controller.visibility());
    card.model_loaded();
    card.image_loaded();

    assert_eq!(card.render_path(), RenderPath::Flat2d);
    assert_eq!(card.frameloop(), FrameloopPolicy::Demand);
}

#[test]
fn override_survives_a_resize_to_mobile() -> anyhow::Result<()> {
    let t0 = Instant::now();
    let mut ctx = PerformanceContext::new(Some(1400));
    ctx.set_probe_result(benchmark_probe(2));
    let rx = ctx.subscribe();

    ctx.set_override(Some(PerformanceTier::High));
    assert_eq!(rx.try_recv()?.profile.tier, PerformanceTier::High);

    ctx.on_resize(600, t0);
    assert!(ctx.poll(t0 + ms(200)));
    let snap = rx.try_recv()?;
    // Explicit intent beats mobile-forces-low.
    assert_eq!(snap.profile.tier, PerformanceTier::High);
    assert!(snap.viewport.is_mobile());
    Ok(())
}

#[test]
fn scroll_timeline_with_grace_period() {
    let t0 = Instant::now();
    let mut ctx = PerformanceContext::new(Some(1400));
    ctx.set_probe_result(benchmark_probe(2));
    let snap = *ctx.snapshot();

    // A region 2000 px down a 800 px-tall page.
    let (region_top, region_height) = (2000.0, 600.0);
    let viewport_height = 800.0;
    let mut controller =
        VisibilityController::new(RegionConfig::labeled("projects"), snap.profile.tier, snap.viewport);
    let mut hero = HeroScene::new(
        AssetDescriptor::new("Room", "/models/room.glb").with_flat_image("/images/room.webp"),
    );

    let observe = |controller: &mut VisibilityController, scroll: f32, at: Duration| {
        let ratio = intersection_ratio(
            region_top,
            region_height,
            scroll,
            viewport_height,
            LEAD_MARGIN_PX,
        );
        controller.observe(ratio, snap.profile.tier, t0 + at);
    };

    // Top of page: far out of view.
    observe(&mut controller, 0.0, ms(0));
    assert_eq!(controller.state(), RegionState::Unmounted);
    hero.apply(&snap, controller.visibility());
    assert_eq!(hero.render_path(), RenderPath::Skeleton);

    // Scrolled close enough for the lead margin to bite.
    observe(&mut controller, 1500.0, ms(100));
    assert_eq!(controller.state(), RegionState::Mounted);
    hero.apply(&snap, controller.visibility());
    hero.model_loaded();
    assert_eq!(hero.render_path(), RenderPath::Scene3d);

    // Quick scroll past and back within the grace window: still mounted,
    // no teardown/remount observed.
    observe(&mut controller, 5000.0, ms(200));
    assert_eq!(controller.state(), RegionState::UnmountPending);
    assert!(controller.visibility().should_mount);
    assert_eq!(controller.poll(t0 + ms(600)), None);
    observe(&mut controller, 1800.0, ms(700));
    assert_eq!(controller.state(), RegionState::Mounted);

    // Scroll away for good: grace expires and the subtree tears down.
    observe(&mut controller, 5000.0, ms(1000));
    assert_eq!(controller.poll(t0 + ms(1900)), None);
    assert_eq!(
        controller.poll(t0 + ms(2100)),
        Some(RegionState::Unmounted)
    );
    hero.apply(&snap, controller.visibility());
    assert_eq!(hero.render_path(), RenderPath::Skeleton);
}

#[test]
fn low_tier_session_uses_the_longer_grace() {
    let t0 = Instant::now();
    let mut ctx = PerformanceContext::new(Some(1400));
    ctx.set_probe_result(benchmark_probe(0));
    let snap = *ctx.snapshot();
    assert_eq!(snap.profile.tier, PerformanceTier::Low);

    let mut controller =
        VisibilityController::new(RegionConfig::labeled("about"), snap.profile.tier, snap.viewport);
    controller.observe(0.5, snap.profile.tier, t0);
    controller.observe(0.0, snap.profile.tier, t0);

    // 1500 ms would have unmounted a normal-tier region.
    assert_eq!(controller.poll(t0 + ms(1500)), None);
    assert_eq!(
        controller.poll(t0 + ms(2000)),
        Some(RegionState::Unmounted)
    );
}

#[test]
fn disabling_3d_flips_every_component_to_cheap_paths() {
    let mut ctx = PerformanceContext::new(Some(1400));
    ctx.set_probe_result(benchmark_probe(3));
    let rx = ctx.subscribe();

    let snap = *ctx.snapshot();
    let controller = VisibilityController::new(
        RegionConfig::labeled("skills"),
        snap.profile.tier,
        snap.viewport,
    );
    // High-tier desktop mounts eagerly.
    assert_eq!(controller.state(), RegionState::Mounted);

    let mut with_image = TechIconCard::new(card_descriptor());
    let mut without_image = TechIconCard::new(AssetDescriptor::new("Rust", "/models/rust.glb"));
    with_image.apply(&snap, controller.visibility());
    without_image.apply(&snap, controller.visibility());
    with_image.model_loaded();
    without_image.model_loaded();
    assert_eq!(with_image.render_path(), RenderPath::Scene3d);

    ctx.set_assets_3d_enabled(false);
    let snap = rx.try_recv().unwrap();
    with_image.apply(&snap, controller.visibility());
    without_image.apply(&snap, controller.visibility());

    assert_eq!(with_image.render_path(), RenderPath::Flat2d);
    assert_eq!(without_image.render_path(), RenderPath::InitialsBadge);
}
