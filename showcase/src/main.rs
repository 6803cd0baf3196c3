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

// Vitrine Showcase
// Drives the whole adaptive pipeline against a real window: probes the GPU,
// classifies the viewport, and simulates a scrolling page of 3D regions.
//
// Controls:
//   scroll wheel  - scroll the simulated page
//   1 / 2 / 3     - force the Low / Medium / High tier
//   0             - clear the override
//   T             - toggle 3D assets on/off
//   Escape        - quit

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use vitrine_core::perf::probe::GpuTierProber;
use vitrine_core::perf::tier::PerformanceTier;
use vitrine_core::perf::viewport::ViewportSource;
use vitrine_core::visibility::{
    intersection_ratio, RegionConfig, VisibilityController, LEAD_MARGIN_PX,
};
use vitrine_core::PerformanceContext;
use vitrine_infra::{BoundedProber, WinitViewport};
use vitrine_scene::{
    AdaptiveVisual, AssetDescriptor, HeroScene, LightingRig, TechIconCard,
};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

/// How often timers (resize debounce, unmount grace) are polled.
const TICK: Duration = Duration::from_millis(50);
/// Pixels scrolled per wheel line.
const LINE_SCROLL_PX: f32 = 60.0;

/// One 3D region on the simulated page.
struct Region {
    top: f32,
    height: f32,
    controller: VisibilityController,
}

struct ShowcaseApp {
    window: Option<Arc<Window>>,
    viewport: Option<WinitViewport>,
    ctx: PerformanceContext,
    hero: HeroScene,
    cards: Vec<TechIconCard>,
    hero_region: Option<Region>,
    cards_region: Option<Region>,
    scroll_y: f32,
    page_height: f32,
    last_revision: u64,
}

impl ShowcaseApp {
    fn new() -> Self {
        let cards = [
            ("React", "react"),
            ("TypeScript", "typescript"),
            ("Rust", "rust"),
            ("Three JS", "threejs"),
        ]
        .into_iter()
        .map(|(name, slug)| {
            TechIconCard::new(
                AssetDescriptor::new(name, format!("assets/models/{slug}.glb"))
                    .with_flat_image(format!("assets/images/{slug}.webp")),
            )
        })
        .collect();

        Self {
            window: None,
            viewport: None,
            ctx: PerformanceContext::new(None),
            hero: HeroScene::new(
                AssetDescriptor::new("Room", "assets/models/room.glb")
                    .with_flat_image("assets/images/room.webp"),
            ),
            cards,
            hero_region: None,
            cards_region: None,
            scroll_y: 0.0,
            page_height: 4000.0,
            last_revision: 0,
        }
    }

    fn viewport_height(&self) -> f32 {
        self.window
            .as_ref()
            .map(|w| w.inner_size().height as f32 / w.scale_factor() as f32)
            .unwrap_or(800.0)
    }

    /// Feeds the current scroll position into both region controllers.
    fn observe_regions(&mut self, now: Instant) {
        let tier = self.ctx.snapshot().profile.tier;
        let viewport_height = self.viewport_height();
        for region in [&mut self.hero_region, &mut self.cards_region]
            .into_iter()
            .flatten()
        {
            let ratio = intersection_ratio(
                region.top,
                region.height,
                self.scroll_y,
                viewport_height,
                LEAD_MARGIN_PX,
            );
            if let Some(state) = region.controller.observe(ratio, tier, now) {
                log::info!("Region '{}' -> {state:?}", region.controller.label());
            }
        }
        self.apply_to_components();
    }

    /// Pushes the latest snapshot and visibility into every component.
    fn apply_to_components(&mut self) {
        let snap = *self.ctx.snapshot();
        if let Some(region) = &self.hero_region {
            self.hero.apply(&snap, region.controller.visibility());
        }
        if let Some(region) = &self.cards_region {
            for card in &mut self.cards {
                card.apply(&snap, region.controller.visibility());
            }
        }

        if snap.revision != self.last_revision {
            self.last_revision = snap.revision;
            self.report();
        }
    }

    /// Logs the effective state as JSON, mirroring a debug overlay.
    fn report(&self) {
        let snap = self.ctx.snapshot();
        let lights = LightingRig::compose(snap);
        let state = serde_json::json!({
            "tier": snap.profile.tier.to_string(),
            "viewport": format!("{:?}", snap.viewport),
            "override": snap.has_override,
            "assets_3d": snap.assets_3d_enabled,
            "hero_path": format!("{:?}", self.hero.render_path()),
            "hero_particles": self.hero.particles().actual_count(),
            "lights": lights.len(),
            "bloom": snap.profile.settings.enable_bloom,
        });
        log::info!("Effective state: {state}");
    }

    fn set_override(&mut self, tier: Option<PerformanceTier>) {
        if self.ctx.set_override(tier) {
            match tier {
                Some(t) => log::info!("Quality override set to {t}."),
                None => log::info!("Quality override cleared."),
            }
            self.apply_to_components();
        }
    }
}

impl ApplicationHandler for ShowcaseApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes().with_title("Vitrine Showcase");
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let viewport = WinitViewport::new(window.clone());
        self.ctx = PerformanceContext::new(viewport.logical_width());

        // One-shot startup probe; the bounded prober resolves to a fallback
        // rather than hanging the loop on a broken driver stack.
        let probe = pollster::block_on(BoundedProber::new().probe());
        self.ctx.set_probe_result(probe);

        let snap = *self.ctx.snapshot();
        let viewport_height = window.inner_size().height as f32 / window.scale_factor() as f32;
        self.hero_region = Some(Region {
            top: 0.0,
            height: viewport_height.max(600.0),
            controller: VisibilityController::new(
                RegionConfig::labeled("hero").with_priority(),
                snap.profile.tier,
                snap.viewport,
            ),
        });
        self.cards_region = Some(Region {
            top: 2200.0,
            height: 700.0,
            controller: VisibilityController::new(
                RegionConfig::labeled("skills"),
                snap.profile.tier,
                snap.viewport,
            ),
        });

        self.window = Some(window);
        self.viewport = Some(viewport);
        self.observe_regions(Instant::now());
        self.report();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                if let Some(viewport) = &self.viewport {
                    self.ctx
                        .on_resize(viewport.resized_width(new_size), Instant::now());
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => lines * LINE_SCROLL_PX,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                let max = self.page_height - self.viewport_height();
                self.scroll_y = (self.scroll_y - dy).clamp(0.0, max.max(0.0));
                self.observe_regions(Instant::now());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                match event.logical_key {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    Key::Character(ref c) => match c.as_str() {
                        "1" => self.set_override(Some(PerformanceTier::Low)),
                        "2" => self.set_override(Some(PerformanceTier::Medium)),
                        "3" => self.set_override(Some(PerformanceTier::High)),
                        "0" => self.set_override(None),
                        "t" | "T" => {
                            let enabled = !self.ctx.snapshot().assets_3d_enabled;
                            self.ctx.set_assets_3d_enabled(enabled);
                            log::info!(
                                "3D assets {}.",
                                if enabled { "enabled" } else { "disabled" }
                            );
                            self.apply_to_components();
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        // Debounced resizes land here.
        if self.ctx.poll(now) {
            self.observe_regions(now);
        }

        // Grace-period expirations.
        for region in [&mut self.hero_region, &mut self.cards_region]
            .into_iter()
            .flatten()
        {
            if let Some(state) = region.controller.poll(now) {
                log::info!("Region '{}' -> {state:?}", region.controller.label());
            }
        }
        self.apply_to_components();

        // Step the hero particle simulation; a real renderer would upload
        // positions when this returns true.
        if self.hero.particles_mut().step() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(now + TICK));
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Vitrine showcase...");

    let event_loop = EventLoop::new()?;
    let mut app = ShowcaseApp::new();
    event_loop.run_app(&mut app)?;

    log::info!("Showcase shut down cleanly.");
    Ok(())
}
