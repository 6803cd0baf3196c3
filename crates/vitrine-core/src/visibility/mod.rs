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

//! Visibility-gated mounting of expensive visual subtrees.
//!
//! Each renderable region owns one [`VisibilityController`]: it watches the
//! region's intersection with the viewport (with a lead margin, so content
//! starts loading slightly before it scrolls into view) and applies a grace
//! period before unmounting, so jittery scrolling never thrashes a subtree
//! through teardown and re-instantiation.
//!
//! Controllers are independent; they share no mutable state, though all read
//! the same effective profile to pick the low-tier grace period.

mod controller;

pub use self::controller::{
    intersection_ratio, RegionConfig, RegionState, VisibilityController, VisibilityState,
    INTERSECTION_THRESHOLD, LEAD_MARGIN_PX, UNMOUNT_GRACE, UNMOUNT_GRACE_LOW_TIER,
};
