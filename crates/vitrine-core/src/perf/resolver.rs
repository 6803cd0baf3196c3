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

//! The performance policy resolver.
//!
//! A pure function from probe result, viewport class, user override, and
//! power hint to one effective tier and settings bundle. The resolver has no
//! side effects and no failure path; callers re-derive the profile when an
//! input changes, not on every render.

use crate::perf::probe::{GpuProbeResult, PowerHint};
use crate::perf::tier::{PerformanceTier, TierSettings};
use crate::perf::viewport::ViewportClass;
use serde::{Deserialize, Serialize};

/// Particle budget multiplier for the tablet + High adjustment.
pub const TABLET_PARTICLE_SCALE: f32 = 0.7;
/// Remaining-charge fraction below which a discharging battery demotes the
/// tier by one step.
pub const LOW_BATTERY_LEVEL: f32 = 0.2;

/// The resolved tier and settings pair governing rendering decisions.
///
/// `settings` is always `TierSettings::lookup(tier)`, possibly with the
/// documented tablet + High adjustment applied to a copy. The static table is
/// never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveProfile {
    /// The effective performance tier.
    pub tier: PerformanceTier,
    /// The settings bundle in effect for that tier.
    pub settings: TierSettings,
}

fn tier_from_coarse(coarse: u8) -> PerformanceTier {
    match coarse {
        0 | 1 => PerformanceTier::Low,
        2 => PerformanceTier::Medium,
        _ => PerformanceTier::High,
    }
}

fn demote(tier: PerformanceTier) -> PerformanceTier {
    match tier {
        PerformanceTier::High => PerformanceTier::Medium,
        _ => PerformanceTier::Low,
    }
}

/// Resolves the effective profile from the policy inputs.
///
/// Precedence, in order:
/// 1. A non-`None` `override_tier` wins outright: explicit user intent beats
///    every heuristic, including mobile-forces-low.
/// 2. A mobile viewport, or a probe that flagged a mobile device, forces
///    `Low`: small screens rarely benefit from high fidelity and commonly
///    have thermal and battery constraints.
/// 3. Otherwise the probe's coarse tier maps {0,1} → Low, {2} → Medium,
///    {3} → High; a missing probe (still loading) counts as Medium. A
///    discharging battery below [`LOW_BATTERY_LEVEL`] then demotes one step.
///
/// The settings are the table record for the effective tier; on a tablet at
/// `High`, a copy gets bloom disabled and its particle budget reduced to
/// [`TABLET_PARTICLE_SCALE`] of the base value.
pub fn resolve(
    probe: Option<&GpuProbeResult>,
    viewport: ViewportClass,
    override_tier: Option<PerformanceTier>,
    power: Option<PowerHint>,
) -> EffectiveProfile {
    let tier = if let Some(tier) = override_tier {
        tier
    } else if viewport.is_mobile() || probe.is_some_and(|p| p.is_mobile) {
        PerformanceTier::Low
    } else {
        let detected = match probe {
            Some(result) => tier_from_coarse(result.coarse_tier),
            // Default while the probe is still in flight.
            None => PerformanceTier::Medium,
        };
        match power {
            Some(PowerHint::Discharging { level }) if level < LOW_BATTERY_LEVEL => demote(detected),
            _ => detected,
        }
    };

    let mut settings = *TierSettings::lookup(tier);
    if viewport.is_tablet() && tier == PerformanceTier::High {
        // Tablets with strong GPUs still throttle under sustained load.
        settings.enable_bloom = false;
        settings.particle_budget =
            (settings.particle_budget as f32 * TABLET_PARTICLE_SCALE) as u32;
    }

    EffectiveProfile { tier, settings }
}
