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

//! Performance tiers and the static tier-to-settings table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse performance classification driving rendering cost.
///
/// Tiers are opaque keys into the settings table; their ordering is
/// meaningful for display only, never for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    /// Integrated GPUs, older laptops, mobile devices.
    Low,
    /// Mid-range dedicated GPUs, recent integrated graphics.
    Medium,
    /// High-end dedicated GPUs, gaming laptops.
    High,
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceTier::Low => write!(f, "low"),
            PerformanceTier::Medium => write!(f, "medium"),
            PerformanceTier::High => write!(f, "high"),
        }
    }
}

/// Shader precision class requested from the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionClass {
    /// Lowest precision the backend accepts.
    Low,
    /// Medium precision.
    Medium,
    /// Full precision.
    High,
}

/// How the render loop schedules frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameloopPolicy {
    /// Render every frame.
    Always,
    /// Render only when something invalidates the current frame.
    Demand,
}

/// The bundle of rendering parameters associated with one tier.
///
/// Pure configuration, no behavior. Exactly one record exists per
/// [`PerformanceTier`]; the table is static and consumers receive copies,
/// never mutable access to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSettings {
    /// Device-pixel-ratio scaling range (min, max).
    pub dpr_range: (f32, f32),
    /// Whether multisample antialiasing is requested.
    pub antialias: bool,
    /// Shader precision class.
    pub precision: PrecisionClass,
    /// Whether lights cast shadows.
    pub shadows: bool,
    /// Bloom post-effect.
    pub enable_bloom: bool,
    /// Environment reflections.
    pub enable_environment: bool,
    /// Area lights (the most expensive light kind).
    pub enable_area_lights: bool,
    /// Maximum number of particles a field may instantiate.
    pub particle_budget: u32,
    /// Frames between particle updates (1 = update every frame).
    pub particle_update_interval: u32,
    /// Intensity of the floating/bobbing idle animation.
    pub float_intensity: f32,
    /// Intensity of the idle rotation animation.
    pub rotation_intensity: f32,
    /// Whether idle animations run at all.
    pub enable_float: bool,
    /// Substitute simplified materials for physically-based ones.
    pub simplified_materials: bool,
    /// Render-loop cadence policy.
    pub frameloop: FrameloopPolicy,
    /// Minimum acceptable frame fraction before the renderer auto-degrades
    /// further.
    pub performance_min: f32,
}

const LOW: TierSettings = TierSettings {
    dpr_range: (0.75, 1.0),
    antialias: false,
    precision: PrecisionClass::Low,
    shadows: false,
    enable_bloom: false,
    enable_environment: false,
    enable_area_lights: false,
    particle_budget: 20,
    particle_update_interval: 4,
    float_intensity: 0.2,
    rotation_intensity: 0.1,
    enable_float: false,
    simplified_materials: true,
    frameloop: FrameloopPolicy::Demand,
    performance_min: 0.3,
};

const MEDIUM: TierSettings = TierSettings {
    dpr_range: (1.0, 1.5),
    antialias: true,
    precision: PrecisionClass::Medium,
    shadows: true,
    enable_bloom: false,
    enable_environment: true,
    enable_area_lights: false,
    particle_budget: 50,
    particle_update_interval: 2,
    float_intensity: 0.5,
    rotation_intensity: 0.3,
    enable_float: true,
    simplified_materials: false,
    frameloop: FrameloopPolicy::Always,
    performance_min: 0.5,
};

const HIGH: TierSettings = TierSettings {
    dpr_range: (1.0, 2.0),
    antialias: true,
    precision: PrecisionClass::High,
    shadows: true,
    enable_bloom: true,
    enable_environment: true,
    enable_area_lights: true,
    particle_budget: 100,
    particle_update_interval: 1,
    float_intensity: 0.9,
    rotation_intensity: 0.5,
    enable_float: true,
    simplified_materials: false,
    frameloop: FrameloopPolicy::Always,
    performance_min: 0.5,
};

impl TierSettings {
    /// Returns the settings record for `tier`.
    ///
    /// Total over the three tiers by construction; there is no error path.
    /// Safe to call from any thread.
    pub const fn lookup(tier: PerformanceTier) -> &'static TierSettings {
        match tier {
            PerformanceTier::Low => &LOW,
            PerformanceTier::Medium => &MEDIUM,
            PerformanceTier::High => &HIGH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TIERS: [PerformanceTier; 3] = [
        PerformanceTier::Low,
        PerformanceTier::Medium,
        PerformanceTier::High,
    ];

    #[test]
    fn lookup_is_total_and_stable() {
        for tier in ALL_TIERS {
            let a = TierSettings::lookup(tier);
            let b = TierSettings::lookup(tier);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn particle_budget_is_monotonic_across_tiers() {
        let low = TierSettings::lookup(PerformanceTier::Low);
        let medium = TierSettings::lookup(PerformanceTier::Medium);
        let high = TierSettings::lookup(PerformanceTier::High);

        assert!(low.particle_budget <= medium.particle_budget);
        assert!(medium.particle_budget <= high.particle_budget);
    }

    #[test]
    fn update_cadence_gets_more_aggressive_with_tier() {
        // A larger interval means fewer updates; intervals must not grow
        // with tier.
        let low = TierSettings::lookup(PerformanceTier::Low);
        let medium = TierSettings::lookup(PerformanceTier::Medium);
        let high = TierSettings::lookup(PerformanceTier::High);

        assert!(low.particle_update_interval >= medium.particle_update_interval);
        assert!(medium.particle_update_interval >= high.particle_update_interval);
        assert!(high.particle_update_interval >= 1);
    }

    #[test]
    fn dpr_ranges_are_well_formed_and_ordered() {
        let mut previous_max = 0.0_f32;
        for tier in ALL_TIERS {
            let settings = TierSettings::lookup(tier);
            let (min, max) = settings.dpr_range;
            assert!(min <= max, "{tier}: dpr min must not exceed max");
            assert!(max >= previous_max, "{tier}: dpr max regressed");
            previous_max = max;
        }
    }

    #[test]
    fn only_low_tier_renders_on_demand() {
        assert_eq!(
            TierSettings::lookup(PerformanceTier::Low).frameloop,
            FrameloopPolicy::Demand
        );
        assert_eq!(
            TierSettings::lookup(PerformanceTier::Medium).frameloop,
            FrameloopPolicy::Always
        );
        assert_eq!(
            TierSettings::lookup(PerformanceTier::High).frameloop,
            FrameloopPolicy::Always
        );
    }

    #[test]
    fn tier_display_matches_wire_names() {
        assert_eq!(PerformanceTier::Low.to_string(), "low");
        assert_eq!(PerformanceTier::Medium.to_string(), "medium");
        assert_eq!(PerformanceTier::High.to_string(), "high");
    }
}
