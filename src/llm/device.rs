//! Execution device selection

use crate::Result;
use candle_core::Device;
use tracing::info;

/// Pick the execution device, preferring an accelerator unless forced to CPU
pub fn get_device(force_cpu: bool) -> Result<Device> {
    if force_cpu {
        info!("Using CPU device");
        return Ok(Device::Cpu);
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Using CUDA device");
                return Ok(device);
            }
            Err(e) => {
                tracing::warn!("CUDA not available: {}, falling back to CPU", e);
            }
        }
    }

    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Using Metal device");
                return Ok(device);
            }
            Err(e) => {
                tracing::warn!("Metal not available: {}, falling back to CPU", e);
            }
        }
    }

    info!("Using CPU device");
    Ok(Device::Cpu)
}

/// Human-readable device name for logging
pub fn device_info(device: &Device) -> &'static str {
    match device {
        Device::Cpu => "CPU",
        Device::Cuda(_) => "CUDA",
        Device::Metal(_) => "Metal",
    }
}
