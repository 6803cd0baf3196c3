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

use crate::platform::platform_mobile_hint;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::time::Duration;
use vitrine_core::perf::probe::{GpuProbeResult, GpuTierProber, ProbeKind};
use wgpu::{DeviceType, Instance, RequestAdapterOptions};

/// Upper bound on the probe's duration.
///
/// An unbounded hang would stall the policy resolver's first evaluation, so
/// on expiry the session settles on the fallback result and never re-probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Probes graphics capability through wgpu adapter enumeration.
///
/// No surface or device is created: adapter information alone is enough to
/// bucket the host into a coarse tier, and it keeps the probe cheap on
/// machines that would struggle with a real benchmark.
#[derive(Debug, Clone)]
pub struct WgpuTierProber {
    mobile_hint: bool,
}

impl WgpuTierProber {
    /// Creates a prober using the compile-time platform mobile hint.
    pub fn new() -> Self {
        Self {
            mobile_hint: platform_mobile_hint(),
        }
    }

    /// Creates a prober with an explicit mobile hint.
    ///
    /// wgpu exposes no mobile flag, so the hint comes from the platform
    /// layer (or a caller that knows better).
    pub fn with_mobile_hint(mobile_hint: bool) -> Self {
        Self { mobile_hint }
    }

    /// Buckets an adapter's physical kind into the coarse 0-3 scale.
    fn coarse_tier_for(device_type: DeviceType) -> u8 {
        match device_type {
            DeviceType::DiscreteGpu => 3,
            DeviceType::IntegratedGpu => 2,
            DeviceType::VirtualGpu => 1,
            DeviceType::Cpu => 0,
            DeviceType::Other => 1,
        }
    }

    async fn run(&self) -> Result<GpuProbeResult> {
        log::info!("Starting GPU capability probe...");
        let instance = Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());

        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None, // No surface needed to read adapter info
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("No suitable graphics adapter: {e}"))?;

        let info = adapter.get_info();
        let coarse_tier = Self::coarse_tier_for(info.device_type);
        log::info!(
            "GPU probe complete: \"{}\" (backend {:?}, type {:?}) -> coarse tier {coarse_tier}.",
            info.name,
            info.backend,
            info.device_type
        );

        Ok(GpuProbeResult {
            coarse_tier,
            is_mobile: self.mobile_hint,
            kind: ProbeKind::Benchmark,
            diagnostics: format!(
                "{} (backend {:?}, type {:?}, driver {})",
                info.name, info.backend, info.device_type, info.driver
            ),
        })
    }
}

impl Default for WgpuTierProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GpuTierProber for WgpuTierProber {
    async fn probe(&self) -> GpuProbeResult {
        self.run()
            .await
            .unwrap_or_else(|e| GpuProbeResult::fallback(e.to_string()))
    }
}

/// Wraps the wgpu prober with the [`PROBE_TIMEOUT`] bound.
///
/// The probe runs on a dedicated worker thread; the caller waits on a
/// channel with a timeout and takes the fallback result if the driver stack
/// hangs. The probe is a one-shot startup operation, so blocking the calling
/// task for up to the timeout is acceptable.
#[derive(Debug, Clone)]
pub struct BoundedProber {
    timeout: Duration,
    mobile_hint: bool,
}

impl BoundedProber {
    /// Creates a bounded prober with the default timeout.
    pub fn new() -> Self {
        Self {
            timeout: PROBE_TIMEOUT,
            mobile_hint: platform_mobile_hint(),
        }
    }

    /// Overrides the timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::new()
        }
    }
}

impl Default for BoundedProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GpuTierProber for BoundedProber {
    async fn probe(&self) -> GpuProbeResult {
        let (sender, receiver) = flume::bounded(1);
        let mobile_hint = self.mobile_hint;

        let spawned = std::thread::Builder::new()
            .name("gpu-probe".to_string())
            .spawn(move || {
                let prober = WgpuTierProber::with_mobile_hint(mobile_hint);
                let result = pollster::block_on(prober.probe());
                // The receiver may have timed out and gone away.
                let _ = sender.send(result);
            });

        if let Err(e) = spawned {
            return GpuProbeResult::fallback(format!("probe thread failed to start: {e}"));
        }

        match receiver.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(_) => GpuProbeResult::fallback(format!(
                "probe exceeded {} ms budget",
                self.timeout.as_millis()
            )),
        }
    }
}
