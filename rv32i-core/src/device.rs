//! The addressable-device contract shared by every memory-mapped component.

use std::fmt::Debug;

/// A byte-addressable device with a fixed, device-declared size.
///
/// Implementors see only device-local offsets; range checking against the full address space is
/// the [`crate::memory_map::MemoryMap`]'s job, not the device's. A device must accept any offset
/// in `[0, device_size)`; accesses that fall (partly or wholly) outside that range should be
/// clamped or ignored rather than panicking.
///
/// Access sizes are always one of 1, 2, or 4 bytes. Values are serialized in little-endian byte
/// order, matching the RV32I memory model.
///
/// Both methods take `&self`: devices that need to mutate on access (RAM, the text sink, the halt
/// register) do so through interior mutability, the same way the processor's own architectural
/// state is the only thing that ever needs `&mut` access during a tick.
pub trait Device: Debug {
    /// Read `out_buf.len()` bytes starting at device-local `offset` into `out_buf`.
    fn load(&self, offset: u32, out_buf: &mut [u8]);

    /// Write `in_buf.len()` bytes starting at device-local `offset`, reading from `in_buf`.
    fn store(&self, offset: u32, in_buf: &[u8]);
}
