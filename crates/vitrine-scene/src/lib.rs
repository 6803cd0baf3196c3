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

//! # Vitrine Scene
//!
//! Adaptive renderable components: each expensive visual (the hero scene,
//! tech-stack icon cards, the particle field, the lighting rig) consumes the
//! effective performance snapshot and its region's visibility signal, and
//! decides *what* to draw and *how expensively* to draw it.
//!
//! Geometry, materials, and GPU submission are out of scope: components
//! receive opaque asset descriptors and produce rendering *decisions*
//! (render path, derived parameters, light lists) for the renderer to act
//! on. The failure policy throughout is "degrade visuals, never break the
//! page".

#![warn(missing_docs)]

pub mod asset;
pub mod hero;
pub mod lighting;
pub mod particles;
pub mod renderable;
pub mod tech_card;

pub use asset::{AssetDescriptor, AssetError, LoadState};
pub use hero::HeroScene;
pub use lighting::{LightDesc, LightKind, LightingRig};
pub use particles::ParticleField;
pub use renderable::{select_render_path, AdaptiveVisual, RenderPath};
pub use tech_card::TechIconCard;
