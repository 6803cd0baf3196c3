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

//! A `winit`-based implementation of the `ViewportSource` trait.

use std::sync::Arc;
use vitrine_core::perf::viewport::ViewportSource;
use winit::{dpi::PhysicalSize, window::Window};

/// Whether the compile target is a mobile platform.
///
/// This is the mobile hint fed into the GPU probe result; wgpu itself cannot
/// tell a phone from a workstation.
pub fn platform_mobile_hint() -> bool {
    cfg!(any(target_os = "android", target_os = "ios"))
}

/// Converts a physical size and scale factor into a logical width.
///
/// The classifier's breakpoints are defined in logical pixels, so HiDPI
/// displays must not be classified by their physical width.
pub fn logical_width(size: PhysicalSize<u32>, scale_factor: f64) -> u32 {
    if scale_factor <= 0.0 {
        return size.width;
    }
    (size.width as f64 / scale_factor).round() as u32
}

/// A wrapper around a `winit::window::Window` that reports the logical
/// viewport width.
///
/// Uses an `Arc` internally so the same window can be shared with whatever
/// else drives the event loop.
#[derive(Debug, Clone)]
pub struct WinitViewport {
    inner: Arc<Window>,
}

impl WinitViewport {
    /// Wraps an existing winit window.
    pub fn new(window: Arc<Window>) -> Self {
        Self { inner: window }
    }

    /// Logical width for an already-received resize event, saving a window
    /// query from inside the event handler.
    pub fn resized_width(&self, new_size: PhysicalSize<u32>) -> u32 {
        logical_width(new_size, self.inner.scale_factor())
    }
}

impl ViewportSource for WinitViewport {
    fn logical_width(&self) -> Option<u32> {
        let size = self.inner.inner_size();
        if size.width == 0 {
            // Some platforms report a zero-sized window before the first
            // resize; treat it as unknown rather than classifying as mobile.
            return None;
        }
        Some(logical_width(size, self.inner.scale_factor()))
    }
}
