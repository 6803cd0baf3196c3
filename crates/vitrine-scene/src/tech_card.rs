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

//! Per-skill 3D icon cards.
//!
//! Each card renders one tech-stack logo model with a floating idle
//! animation. Cards are the most numerous 3D regions on the page, so they
//! lean hardest on the 2D fallback: every logo ships a flat image, and on
//! constrained devices no card ever creates a 3D context.

use crate::asset::{AssetDescriptor, AssetError, LoadState};
use crate::renderable::{effective_frameloop, select_render_path, AdaptiveVisual, RenderPath};
use vitrine_core::perf::context::PerfSnapshot;
use vitrine_core::perf::tier::FrameloopPolicy;
use vitrine_core::visibility::VisibilityState;

/// Speed of the floating idle animation (fixed; intensity is tiered).
pub const FLOAT_SPEED: f32 = 5.5;

/// Idle-animation parameters derived from the tier settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatParams {
    /// Animation speed.
    pub speed: f32,
    /// Rotation intensity scalar.
    pub rotation_intensity: f32,
    /// Bobbing intensity scalar.
    pub float_intensity: f32,
    /// Whether the animation runs at all.
    pub enabled: bool,
}

/// One adaptive tech-stack icon card.
#[derive(Debug)]
pub struct TechIconCard {
    descriptor: AssetDescriptor,
    model: LoadState,
    image: LoadState,
    path: RenderPath,
    frameloop: FrameloopPolicy,
    float: FloatParams,
    simplified_materials: bool,
    environment: bool,
    last: Option<(PerfSnapshot, VisibilityState)>,
}

impl TechIconCard {
    /// Creates a card for one logo descriptor.
    pub fn new(descriptor: AssetDescriptor) -> Self {
        Self {
            descriptor,
            model: LoadState::Loading,
            image: LoadState::Loading,
            path: RenderPath::Skeleton,
            frameloop: FrameloopPolicy::Demand,
            float: FloatParams {
                speed: FLOAT_SPEED,
                rotation_intensity: 0.0,
                float_intensity: 0.0,
                enabled: false,
            },
            simplified_materials: false,
            environment: false,
            last: None,
        }
    }

    /// The logo this card renders.
    pub fn descriptor(&self) -> &AssetDescriptor {
        &self.descriptor
    }

    /// Badge text shown when even the 2D logo fails.
    pub fn badge_text(&self) -> String {
        self.descriptor.initials()
    }

    /// Idle-animation parameters in effect.
    pub fn float_params(&self) -> FloatParams {
        self.float
    }

    /// Whether the card should use simplified (non-PBR) materials.
    pub fn simplified_materials(&self) -> bool {
        self.simplified_materials
    }

    /// Whether environment reflections are enabled for this card.
    pub fn environment_enabled(&self) -> bool {
        self.environment
    }

    /// Marks the logo model as loaded.
    pub fn model_loaded(&mut self) {
        self.model = LoadState::Ready;
        self.refresh();
    }

    /// Records a model load failure.
    pub fn model_failed(&mut self, error: AssetError) {
        log::warn!("Icon card '{}' degrading: {error}", self.descriptor.name);
        self.model = LoadState::Failed;
        self.refresh();
    }

    /// Marks the 2D logo image as loaded.
    pub fn image_loaded(&mut self) {
        self.image = LoadState::Ready;
        self.refresh();
    }

    /// Records a 2D logo failure; the initials badge takes over.
    pub fn image_failed(&mut self, error: AssetError) {
        log::warn!(
            "Icon card '{}' badge fallback: {error}",
            self.descriptor.name
        );
        self.image = LoadState::Failed;
        self.refresh();
    }

    fn refresh(&mut self) {
        if let Some((snapshot, visibility)) = self.last {
            self.derive(&snapshot, visibility);
        }
    }

    fn derive(&mut self, snapshot: &PerfSnapshot, visibility: VisibilityState) {
        let settings = &snapshot.profile.settings;
        self.float = FloatParams {
            speed: FLOAT_SPEED,
            rotation_intensity: settings.rotation_intensity,
            float_intensity: settings.float_intensity,
            enabled: settings.enable_float,
        };
        self.simplified_materials = settings.simplified_materials;
        self.environment = settings.enable_environment;
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

impl AdaptiveVisual for TechIconCard {
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
