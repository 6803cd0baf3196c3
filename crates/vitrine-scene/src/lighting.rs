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

//! The hero scene's lighting rig.
//!
//! Composes a light list from the effective snapshot: the key light is
//! always present, secondary fills drop out on constrained devices, and the
//! area light, the most expensive kind, exists only on high-tier desktops
//! whose settings allow it.

use vitrine_core::perf::context::PerfSnapshot;

/// The kinds of light the rig can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Directional cone.
    Spot,
    /// Omnidirectional point.
    Point,
    /// Rectangular area light.
    Area,
}

/// One light the renderer should instantiate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightDesc {
    /// Light kind.
    pub kind: LightKind,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Intensity in the renderer's units.
    pub intensity: f32,
    /// World position.
    pub position: [f32; 3],
    /// Whether this light casts shadows.
    pub cast_shadow: bool,
}

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
const SKY_BLUE: [f32; 3] = [0.298, 0.788, 0.941];
const ORCHID: [f32; 3] = [0.616, 0.306, 0.867];
const LAMP_VIOLET: [f32; 3] = [0.635, 0.349, 1.0];
const AMBIENT_PURPLE: [f32; 3] = [0.447, 0.035, 0.718];
const DEEP_BLUE: [f32; 3] = [0.051, 0.0, 0.643];

/// Stateless composer of the hero lighting setup.
#[derive(Debug, Default)]
pub struct LightingRig;

impl LightingRig {
    /// Builds the light list for the current snapshot.
    pub fn compose(snapshot: &PerfSnapshot) -> Vec<LightDesc> {
        let mobile = snapshot.viewport.is_mobile();
        let constrained = mobile || snapshot.is_low_tier();
        let settings = &snapshot.profile.settings;
        let mut lights = Vec::new();

        // The main lamp, needed everywhere.
        lights.push(LightDesc {
            kind: LightKind::Spot,
            color: WHITE,
            intensity: if mobile { 80.0 } else { 100.0 },
            position: [2.0, 5.0, 6.0],
            cast_shadow: settings.shadows && !mobile,
        });

        // Secondary fills drop out on constrained devices.
        if !constrained {
            lights.push(LightDesc {
                kind: LightKind::Spot,
                color: SKY_BLUE,
                intensity: 40.0,
                position: [4.0, 5.0, 4.0],
                cast_shadow: false,
            });
            lights.push(LightDesc {
                kind: LightKind::Spot,
                color: ORCHID,
                intensity: 60.0,
                position: [-3.0, 5.0, 5.0],
                cast_shadow: false,
            });
        }

        // The area light only where both the tier settings and a desktop
        // viewport allow the cost.
        if settings.enable_area_lights && snapshot.viewport.is_desktop() {
            lights.push(LightDesc {
                kind: LightKind::Area,
                color: LAMP_VIOLET,
                intensity: 15.0,
                position: [1.0, 3.0, 4.0],
                cast_shadow: false,
            });
        }

        // Essential ambient fill for all devices.
        lights.push(LightDesc {
            kind: LightKind::Point,
            color: AMBIENT_PURPLE,
            intensity: if mobile { 5.0 } else { 10.0 },
            position: [0.0, 1.0, 0.0],
            cast_shadow: false,
        });

        if !mobile {
            lights.push(LightDesc {
                kind: LightKind::Point,
                color: DEEP_BLUE,
                intensity: 10.0,
                position: [1.0, 2.0, -2.0],
                cast_shadow: false,
            });
        }

        log::trace!("Lighting rig composed {} light(s).", lights.len());
        lights
    }
}
