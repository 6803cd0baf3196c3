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

//! The hero 3D scene: the landing region's centerpiece.
//!
//! Owns its particle field child and derives camera, orbit, and placement
//! parameters from the snapshot. The hero region is typically configured as
//! priority (it is the first thing a visitor sees), so its mount controller
//! starts it eagerly.

use crate::asset::{AssetDescriptor, AssetError, LoadState};
use crate::particles::ParticleField;
use crate::renderable::{effective_frameloop, select_render_path, AdaptiveVisual, RenderPath};
use std::f32::consts::PI;
use vitrine_core::perf::context::PerfSnapshot;
use vitrine_core::perf::tier::FrameloopPolicy;
use vitrine_core::visibility::VisibilityState;

/// Particles the hero scene requests before budget clamping.
pub const HERO_PARTICLES_REQUESTED: u32 = 100;
/// Scene scale applied on mobile viewports.
pub const MOBILE_SCALE: f32 = 0.7;

/// Fixed camera parameters for the hero scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Camera position.
    pub position: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov: f32,
}

/// Orbit-control constraints derived from the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSettings {
    /// Panning is never allowed in the hero scene.
    pub enable_pan: bool,
    /// Zoom is disabled on tablets and phones.
    pub enable_zoom: bool,
    /// Maximum zoom-out distance.
    pub max_distance: f32,
    /// Minimum zoom-in distance.
    pub min_distance: f32,
    /// Lower bound on vertical rotation.
    pub min_polar_angle: f32,
    /// Upper bound on vertical rotation.
    pub max_polar_angle: f32,
}

/// The adaptive hero scene.
#[derive(Debug)]
pub struct HeroScene {
    descriptor: AssetDescriptor,
    particles: ParticleField,
    model: LoadState,
    image: LoadState,
    path: RenderPath,
    frameloop: FrameloopPolicy,
    scale: f32,
    orbit: OrbitSettings,
    last: Option<(PerfSnapshot, VisibilityState)>,
}

impl HeroScene {
    /// Creates the scene around the given room asset.
    pub fn new(descriptor: AssetDescriptor) -> Self {
        Self {
            descriptor,
            particles: ParticleField::new(HERO_PARTICLES_REQUESTED),
            model: LoadState::Loading,
            image: LoadState::Loading,
            path: RenderPath::Skeleton,
            frameloop: FrameloopPolicy::Demand,
            scale: 1.0,
            orbit: OrbitSettings {
                enable_pan: false,
                enable_zoom: true,
                max_distance: 20.0,
                min_distance: 10.0,
                min_polar_angle: PI / 5.0,
                max_polar_angle: PI / 2.0,
            },
            last: None,
        }
    }

    /// Fixed camera parameters.
    pub fn camera(&self) -> CameraSettings {
        CameraSettings {
            position: [0.0, 0.0, 15.0],
            fov: 45.0,
        }
    }

    /// Current orbit constraints.
    pub fn orbit(&self) -> OrbitSettings {
        self.orbit
    }

    /// Current placement scale.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The particle field child.
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    /// Mutable access for stepping the particle simulation.
    pub fn particles_mut(&mut self) -> &mut ParticleField {
        &mut self.particles
    }

    /// The asset this scene renders.
    pub fn descriptor(&self) -> &AssetDescriptor {
        &self.descriptor
    }

    /// Marks the 3D model as loaded.
    pub fn model_loaded(&mut self) {
        self.model = LoadState::Ready;
        self.refresh();
    }

    /// Records a model load failure; the scene degrades to a placeholder.
    pub fn model_failed(&mut self, error: AssetError) {
        log::warn!("Hero scene degrading to placeholder: {error}");
        self.model = LoadState::Failed;
        self.refresh();
    }

    /// Records a 2D image load failure; the initials badge takes over.
    pub fn image_failed(&mut self, error: AssetError) {
        log::warn!("Hero 2D stand-in unavailable: {error}");
        self.image = LoadState::Failed;
        self.refresh();
    }

    fn refresh(&mut self) {
        if let Some((snapshot, visibility)) = self.last {
            self.derive(&snapshot, visibility);
        }
    }

    fn derive(&mut self, snapshot: &PerfSnapshot, visibility: VisibilityState) {
        let mobile = snapshot.viewport.is_mobile();
        self.scale = if mobile { MOBILE_SCALE } else { 1.0 };
        self.orbit.enable_zoom = snapshot.viewport.is_desktop();
        self.particles.apply(snapshot, visibility);
        self.path = select_render_path(
            snapshot,
            visibility,
            self.model,
            self.image,
            self.descriptor.has_flat_image(),
        );
        self.frameloop = effective_frameloop(snapshot, visibility);
    }
}

impl AdaptiveVisual for HeroScene {
    fn apply(&mut self, snapshot: &PerfSnapshot, visibility: VisibilityState) {
        self.last = Some((*snapshot, visibility));
        self.derive(snapshot, visibility);
    }

    fn render_path(&self) -> RenderPath {
        self.path
    }

    fn frameloop(&self) -> FrameloopPolicy {
        self.frameloop
    }
}
