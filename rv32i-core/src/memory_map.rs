//! Address-routed registry of devices: the second leaf component in the dependency order.

use crate::address_map::AddressMap;
use crate::address_range::AddressRange;
use crate::device::Device;
use std::rc::Rc;
use thiserror::Error;

/// Registry of `(address range -> device)` bindings.
///
/// Translates a global 32-bit address to `(device, device-local offset)` and forwards the
/// access. Lookup uses the same ordered binary search as [`AddressMap`]; device counts here are
/// small (typically under 8), so either a linear scan or the binary search would do, but we keep
/// the binary search since it already exists in [`AddressMap`].
#[derive(Debug, Default)]
pub struct MemoryMap {
    devices: AddressMap<Rc<dyn Device>>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self {
            devices: AddressMap::new(),
        }
    }

    /// Register a device over `[start, end_exclusive)`.
    ///
    /// Fails if the new range intersects any range already registered.
    pub fn add_device(
        &mut self,
        start: u32,
        end_exclusive: u32,
        device: Rc<dyn Device>,
    ) -> Result<(), MemoryMapError> {
        let range = AddressRange::try_from(start..end_exclusive)
            .map_err(|_| MemoryMapError::InvalidRange { start, end_exclusive })?;
        self.add_device_range(range, device)
    }

    /// Register a device over an inclusive [`AddressRange`].
    ///
    /// Needed alongside [`Self::add_device`] for ranges that reach `u32::MAX`, since those cannot
    /// be expressed as `[start, end_exclusive)` without overflowing `end_exclusive`.
    pub fn add_device_range(
        &mut self,
        range: AddressRange,
        device: Rc<dyn Device>,
    ) -> Result<(), MemoryMapError> {
        self.devices
            .insert(range, device)
            .map_err(|err| MemoryMapError::Overlap {
                new: err.new,
                existing: err.existing,
            })
    }

    /// Look up the device whose range contains `addr` and forward a load to it.
    ///
    /// A spanning access (one whose full `[addr, addr+out_buf.len())` crosses out of the matched
    /// device's range) is routed by `addr` alone and the full size is forwarded to that device,
    /// per the reference policy; the device is relied on to handle or clamp the overrun itself.
    ///
    /// An unmapped `addr` yields zeros, matching the reference's "execution anomaly" policy
    /// rather than treating every unmapped access as fatal.
    pub fn load(&self, addr: u32, out_buf: &mut [u8]) {
        let (range, device) = self.devices.range_value(addr);
        match device {
            Some(device) => {
                device.load(addr - range.start(), out_buf);
            }
            None => {
                log::warn!("load from unmapped address {addr:#010x}, size {}", out_buf.len());
                out_buf.fill(0);
            }
        }
    }

    /// Look up the device whose range contains `addr` and forward a store to it.
    ///
    /// An unmapped `addr` silently discards the write, matching the reference policy.
    pub fn store(&self, addr: u32, in_buf: &[u8]) {
        let (range, device) = self.devices.range_value(addr);
        match device {
            Some(device) => {
                device.store(addr - range.start(), in_buf);
            }
            None => {
                log::warn!("store to unmapped address {addr:#010x}, size {}", in_buf.len());
            }
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum MemoryMapError {
    #[error("address range [{start:#010x}, {end_exclusive:#010x}) is empty or invalid")]
    InvalidRange { start: u32, end_exclusive: u32 },
    #[error("address range {new} overlaps with already-registered range {existing}")]
    Overlap {
        new: AddressRange,
        existing: AddressRange,
    },
}
