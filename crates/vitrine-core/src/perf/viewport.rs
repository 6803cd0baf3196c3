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

//! Viewport size classification, debounced against resize storms.

use crate::utils::timer::Debouncer;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Widths at or below this (logical pixels) classify as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 768;
/// Widths at or below this (and above mobile) classify as tablet.
pub const TABLET_MAX_WIDTH: u32 = 1024;
/// Quiet period applied to resize events before reclassification.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Size bucket the current viewport falls into.
///
/// Exactly one bucket applies at a time; the accessors mirror the
/// mutually-exclusive boolean surface consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Width ≤ 768.
    Mobile,
    /// 768 < width ≤ 1024.
    Tablet,
    /// Width > 1024.
    Desktop,
}

impl ViewportClass {
    /// Classifies a logical width into its bucket.
    pub fn from_width(width: u32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            ViewportClass::Mobile
        } else if width <= TABLET_MAX_WIDTH {
            ViewportClass::Tablet
        } else {
            ViewportClass::Desktop
        }
    }

    /// True for the mobile bucket.
    pub fn is_mobile(self) -> bool {
        self == ViewportClass::Mobile
    }

    /// True for the tablet bucket.
    pub fn is_tablet(self) -> bool {
        self == ViewportClass::Tablet
    }

    /// True for the desktop bucket.
    pub fn is_desktop(self) -> bool {
        self == ViewportClass::Desktop
    }
}

/// Anything that can report the current logical viewport width.
///
/// Implemented in `vitrine-infra` for real windows; `None` means the host
/// cannot report a width, in which case classification falls back to desktop
/// rather than blocking the rest of the page.
pub trait ViewportSource {
    /// Current logical width in pixels, if the host can report one.
    fn logical_width(&self) -> Option<u32>;
}

/// Tracks the current [`ViewportClass`], debouncing resize events.
///
/// The initial classification is computed synchronously at construction so
/// consumers never observe a wrong-class flash; later resizes are coalesced
/// through a single cancel-and-reschedule timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportClassifier {
    current: ViewportClass,
    pending_width: Option<u32>,
    debounce: Debouncer,
}

impl ViewportClassifier {
    /// Creates a classifier from the construction-time width.
    ///
    /// A host that cannot report a width yields the desktop fallback.
    pub fn new(initial_width: Option<u32>) -> Self {
        let current = match initial_width {
            Some(width) => ViewportClass::from_width(width),
            None => {
                log::warn!("Viewport width unavailable; falling back to desktop classification.");
                ViewportClass::Desktop
            }
        };
        log::debug!("Initial viewport classification: {current:?}");
        Self {
            current,
            pending_width: None,
            debounce: Debouncer::new(RESIZE_DEBOUNCE),
        }
    }

    /// The classification currently in effect.
    pub fn current(&self) -> ViewportClass {
        self.current
    }

    /// Notes a resize event; reclassification happens once the burst quiets.
    pub fn on_resize(&mut self, width: u32, now: Instant) {
        log::trace!("Resize event: width={width}");
        self.pending_width = Some(width);
        self.debounce.record(now);
    }

    /// Applies a quiet pending resize, if any.
    ///
    /// ## Returns
    /// The new classification when it changed, `None` otherwise.
    pub fn poll(&mut self, now: Instant) -> Option<ViewportClass> {
        if !self.debounce.ready(now) {
            return None;
        }
        let width = self.pending_width.take()?;
        let class = ViewportClass::from_width(width);
        if class == self.current {
            return None;
        }
        log::debug!("Viewport reclassified: {:?} -> {class:?}", self.current);
        self.current = class;
        Some(class)
    }
}
