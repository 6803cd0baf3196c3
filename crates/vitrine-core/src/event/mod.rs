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

//! Primitives for event-driven communication.
//!
//! The performance subsystem has a single writer (the performance context)
//! and many readers (renderable components), so the primary primitive here is
//! the [`SnapshotBus`], a fan-out channel: each subscriber owns a private
//! `flume` receiver and unsubscribes simply by dropping it.
//!
//! Keeping the bus generic lets higher-level crates define their own payload
//! types without circular dependencies.

mod bus;

pub use self::bus::SnapshotBus;
