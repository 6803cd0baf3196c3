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

//! Opaque asset descriptors and load-state tracking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes one renderable asset and its placement.
///
/// Provided by configuration external to this subsystem; components decide
/// *whether* and *how cheaply* to render it, never what its geometry is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Display name (also the source of the initials badge).
    pub name: String,
    /// Path or identifier of the 3D model.
    pub model_path: String,
    /// Path of the cheap 2D stand-in, when one exists.
    #[serde(default)]
    pub flat_image_path: Option<String>,
    /// Uniform scale applied at placement.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Euler rotation in radians.
    #[serde(default)]
    pub rotation: [f32; 3],
    /// Position offset.
    #[serde(default)]
    pub position: [f32; 3],
}

fn default_scale() -> f32 {
    1.0
}

impl AssetDescriptor {
    /// A descriptor with default placement.
    pub fn new(name: impl Into<String>, model_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_path: model_path.into(),
            flat_image_path: None,
            scale: 1.0,
            rotation: [0.0; 3],
            position: [0.0; 3],
        }
    }

    /// Attaches a 2D stand-in image.
    pub fn with_flat_image(mut self, path: impl Into<String>) -> Self {
        self.flat_image_path = Some(path.into());
        self
    }

    /// Whether a cheap 2D rendering path exists for this asset.
    pub fn has_flat_image(&self) -> bool {
        self.flat_image_path.is_some()
    }

    /// Up-to-two-letter badge text used when even the 2D image fails.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Load lifecycle of one asset (model or image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Fetch in flight.
    #[default]
    Loading,
    /// Available for rendering.
    Ready,
    /// The fetch failed; a fallback path must be shown.
    Failed,
}

/// An asset fetch failure.
///
/// Never fatal: components substitute placeholders and log, at most, a
/// console diagnostic.
#[derive(Debug)]
pub enum AssetError {
    /// The 3D model failed to load.
    ModelLoad {
        /// Path of the model that failed.
        path: String,
        /// Underlying loader error text.
        details: String,
    },
    /// The 2D stand-in image failed to load.
    ImageLoad {
        /// Path of the image that failed.
        path: String,
        /// Underlying loader error text.
        details: String,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::ModelLoad { path, details } => {
                write!(f, "Failed to load 3D model '{path}': {details}")
            }
            AssetError::ImageLoad { path, details } => {
                write!(f, "Failed to load 2D image '{path}': {details}")
            }
        }
    }
}

impl std::error::Error for AssetError {}
