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

//! The decorative falling-particle field.
//!
//! Particle count and update cadence come from the tier settings, never from
//! hardcoded constants: the requested count is clamped to the tier budget,
//! scaled down further on Low, and updates skip frames per the settings.

use rand::Rng;
use vitrine_core::perf::context::PerfSnapshot;
use vitrine_core::visibility::VisibilityState;

/// Multiplier applied to the particle count on the Low tier.
pub const LOW_TIER_COUNT_SCALE: f32 = 0.3;
/// Below this many particles the field is not worth drawing at all.
pub const MIN_VISIBLE_PARTICLES: u32 = 5;

const FLOOR_Y: f32 = -2.0;
const RESPAWN_Y_MIN: f32 = 5.0;
const RESPAWN_Y_SPAN: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
struct Particle {
    position: [f32; 3],
    speed: f32,
}

fn spawn_particle<R: Rng>(rng: &mut R) -> Particle {
    Particle {
        position: [
            rng.random_range(-5.0..5.0),
            RESPAWN_Y_MIN + rng.random_range(0.0..RESPAWN_Y_SPAN),
            rng.random_range(-5.0..5.0),
        ],
        speed: 0.005 + rng.random_range(0.0..0.001),
    }
}

/// Derived point-sprite styling for the current tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleStyle {
    /// Point size.
    pub size: f32,
    /// Sprite opacity.
    pub opacity: f32,
}

/// A tier-scaled field of falling particles.
#[derive(Debug)]
pub struct ParticleField {
    requested: u32,
    particles: Vec<Particle>,
    update_interval: u32,
    frame: u32,
    style: ParticleStyle,
    mounted: bool,
}

impl ParticleField {
    /// Creates a field that would like `requested` particles, budget
    /// permitting.
    pub fn new(requested: u32) -> Self {
        Self {
            requested,
            particles: Vec::new(),
            update_interval: 1,
            frame: 0,
            style: ParticleStyle {
                size: 0.05,
                opacity: 0.9,
            },
            mounted: false,
        }
    }

    /// Re-derives count, cadence, and styling from a fresh snapshot.
    ///
    /// Reseeds positions only when the effective count changes, so profile
    /// updates that leave the count alone do not visually restart the field.
    pub fn apply(&mut self, snapshot: &PerfSnapshot, visibility: VisibilityState) {
        self.mounted = visibility.should_mount;

        let settings = &snapshot.profile.settings;
        let multiplier = if snapshot.is_low_tier() {
            LOW_TIER_COUNT_SCALE
        } else {
            1.0
        };
        let count = (self.requested.min(settings.particle_budget) as f32 * multiplier) as u32;

        self.update_interval = settings.particle_update_interval.max(1);
        self.style = if snapshot.is_low_tier() {
            ParticleStyle {
                size: 0.03,
                opacity: 0.7,
            }
        } else {
            ParticleStyle {
                size: 0.05,
                opacity: 0.9,
            }
        };

        if count as usize != self.particles.len() {
            log::debug!(
                "Particle field resized: {} -> {count} (budget {}, tier {}).",
                self.particles.len(),
                settings.particle_budget,
                snapshot.profile.tier
            );
            let mut rng = rand::rng();
            self.particles = (0..count).map(|_| spawn_particle(&mut rng)).collect();
            self.frame = 0;
        }
    }

    /// Effective particle count after budget and tier scaling.
    pub fn actual_count(&self) -> u32 {
        self.particles.len() as u32
    }

    /// Whether the field should be drawn at all.
    pub fn is_visible(&self) -> bool {
        self.mounted && self.actual_count() >= MIN_VISIBLE_PARTICLES
    }

    /// Point-sprite styling for the current tier.
    pub fn style(&self) -> ParticleStyle {
        self.style
    }

    /// Advances the simulation by one frame.
    ///
    /// Honors the tier's skip-frame cadence: only every
    /// `particle_update_interval`-th call moves the particles.
    ///
    /// ## Returns
    /// `true` when positions changed and the field needs re-upload.
    pub fn step(&mut self) -> bool {
        self.frame = (self.frame + 1) % self.update_interval;
        if self.frame != 0 || !self.is_visible() {
            return false;
        }

        let mut rng = rand::rng();
        for particle in &mut self.particles {
            particle.position[1] -= particle.speed;
            if particle.position[1] < FLOOR_Y {
                particle.position[1] = RESPAWN_Y_MIN + rng.random_range(0.0..RESPAWN_Y_SPAN);
            }
        }
        true
    }

    /// Flat XYZ position buffer for upload.
    pub fn positions(&self) -> Vec<f32> {
        self.particles
            .iter()
            .flat_map(|p| p.position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::perf::probe::{GpuProbeResult, ProbeKind};
    use vitrine_core::perf::resolver::resolve;
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

    #[test]
    fn count_is_clamped_to_the_tier_budget() {
        let mut field = ParticleField::new(200);
        field.apply(&snapshot(3, ViewportClass::Desktop), mounted());
        // High budget is 100.
        assert_eq!(field.actual_count(), 100);

        field.apply(&snapshot(2, ViewportClass::Desktop), mounted());
        assert_eq!(field.actual_count(), 50);
    }

    #[test]
    fn requested_count_below_budget_is_respected() {
        let mut field = ParticleField::new(30);
        field.apply(&snapshot(3, ViewportClass::Desktop), mounted());
        assert_eq!(field.actual_count(), 30);
    }

    #[test]
    fn low_tier_scales_the_count_down_hard() {
        let mut field = ParticleField::new(200);
        field.apply(&snapshot(0, ViewportClass::Desktop), mounted());
        // Low budget 20 × 0.3 multiplier.
        assert_eq!(field.actual_count(), 6);
        assert_eq!(field.style().size, 0.03);
    }

    #[test]
    fn tiny_fields_are_hidden_entirely() {
        let mut field = ParticleField::new(10);
        field.apply(&snapshot(0, ViewportClass::Desktop), mounted());
        // 10 × 0.3 = 3 particles: below the visibility floor.
        assert_eq!(field.actual_count(), 3);
        assert!(!field.is_visible());
    }

    #[test]
    fn unmounted_field_is_not_visible_and_does_not_step() {
        let mut field = ParticleField::new(100);
        field.apply(
            &snapshot(3, ViewportClass::Desktop),
            VisibilityState {
                is_intersecting: false,
                should_mount: false,
            },
        );
        assert!(!field.is_visible());
        assert!(!field.step());
    }

    #[test]
    fn step_skips_frames_per_tier_cadence() {
        let mut field = ParticleField::new(100);
        // Medium updates every 2nd frame.
        field.apply(&snapshot(2, ViewportClass::Desktop), mounted());

        let updates = (0..8).filter(|_| field.step()).count();
        assert_eq!(updates, 4);
    }

    #[test]
    fn stable_count_does_not_reseed() {
        let mut field = ParticleField::new(100);
        let snap = snapshot(3, ViewportClass::Desktop);
        field.apply(&snap, mounted());
        let before = field.positions();

        // Same count on re-apply: positions must survive.
        field.apply(&snap, mounted());
        assert_eq!(field.positions(), before);
    }

    #[test]
    fn particles_fall_and_respawn_above() {
        let mut field = ParticleField::new(50);
        // High tier: updates every frame.
        field.apply(&snapshot(3, ViewportClass::Desktop), mounted());

        let before = field.positions();
        assert!(field.step());
        let after = field.positions();

        // Y coordinates move down (or respawn far above the floor).
        for i in 0..field.actual_count() as usize {
            let (y_before, y_after) = (before[i * 3 + 1], after[i * 3 + 1]);
            assert!(y_after < y_before || y_after >= RESPAWN_Y_MIN);
            assert!(y_after >= FLOOR_Y);
        }
    }
}
