//! The simulator container: owns the core and every device, and drives the step loop.

use crate::core::Processor;
use crate::memory_map::{MemoryMap, MemoryMapError};
use crate::registers::ArchState;
use crate::resources::halt::Halt;
use crate::resources::ram::Ram;
use crate::resources::rom::Rom;
use crate::resources::text_sink::TextSink;
use crate::tick::Tickable;
use std::rc::Rc;
use thiserror::Error;

/// Layout of the canonical memory map, and the reset vector the core starts executing from.
///
/// Mirrors `spec.md`'s reference layout; every field can be overridden, e.g. by tests that want a
/// smaller ROM/RAM footprint than the canonical one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub rom_base: u32,
    pub rom_size: u32,
    pub ram_base: u32,
    pub ram_size: u32,
    pub text_sink_base: u32,
    pub halt_base: u32,
    pub halt_size: u32,
    /// Overrides the core's initial `pc`. `None` means "use the image's entry point".
    pub reset_vector: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rom_base: 0x0000_0000,
            rom_size: 0x0001_0000,
            ram_base: 0x8000_0000,
            ram_size: 0x0010_0000,
            text_sink_base: 0x1000_0000,
            halt_base: 0xFFFF_FFF0,
            halt_size: 0x10,
            reset_vector: None,
        }
    }
}

/// Owns the processor core and every memory-mapped device, and drives stepping.
#[derive(Debug)]
pub struct Simulator {
    processor: Processor,
    tickables: Vec<Rc<dyn Tickable>>,
    halt: Rc<Halt>,
}

impl Simulator {
    /// Construct a simulator with the canonical memory map, loading `image` into ROM.
    ///
    /// `image` is the already-read contents of the executable to load (the loader that turns a
    /// path on disk into this buffer, plus the entry point, lives outside this crate). `entry_point`
    /// is overridden by [`Config::reset_vector`] if set.
    pub fn new(config: Config, image: &[u8], entry_point: u32) -> Result<Self, SimulatorError> {
        if image.len() > config.rom_size as usize {
            return Err(SimulatorError::ImageMalformed {
                reason: format!(
                    "image is {} bytes, larger than the configured ROM size {} bytes",
                    image.len(),
                    config.rom_size
                ),
            });
        }

        let mut memory_map = MemoryMap::new();

        let rom = Rc::new(Rom::new(config.rom_size, image));
        memory_map.add_device(config.rom_base, config.rom_base + config.rom_size, rom)?;

        let ram = Rc::new(Ram::new(config.ram_size));
        memory_map.add_device(config.ram_base, config.ram_base + config.ram_size, ram)?;

        let text_sink = Rc::new(TextSink::stdout());
        memory_map.add_device(config.text_sink_base, config.text_sink_base + 2, text_sink.clone())?;

        let halt = Rc::new(Halt::new());
        let halt_end = config.halt_base.wrapping_add(config.halt_size.saturating_sub(1));
        let halt_range = crate::address_range::AddressRange::new(config.halt_base, halt_end)
            .map_err(|_| MemoryMapError::InvalidRange { start: config.halt_base, end_exclusive: halt_end })?;
        memory_map.add_device_range(halt_range, halt.clone())?;

        let memory_map = Rc::new(memory_map);
        let pc = config.reset_vector.unwrap_or(entry_point);
        let processor = Processor::new(pc, memory_map);

        log::trace!("constructed simulator, pc={pc:#010x}");

        Ok(Self {
            processor,
            tickables: vec![text_sink],
            halt,
        })
    }

    /// Advance the simulation by up to `n` ticks, stopping early if halt is observed.
    ///
    /// Returns the number of ticks actually executed.
    pub fn step(&mut self, n: u64) -> u64 {
        let mut executed = 0;
        for _ in 0..n {
            if self.halted() {
                break;
            }
            self.processor.tick();
            for tickable in &self.tickables {
                tickable.tick();
            }
            executed += 1;
        }
        executed
    }

    pub fn arch_state(&self) -> ArchState {
        self.processor.arch_state()
    }

    pub fn set_arch_state(&self, state: ArchState) {
        self.processor.set_arch_state(state);
    }

    /// Returns `true` if the halt device has observed a write since construction.
    pub fn halted(&self) -> bool {
        self.halt.is_set()
    }

    /// Reads a 32-bit word through the memory map, for test and debugging inspection.
    pub fn peek_word(&self, addr: u32) -> u32 {
        let mut buf = [0u8; 4];
        self.processor.memory_map().load(addr, &mut buf);
        u32::from_le_bytes(buf)
    }
}

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("executable image not found: {0}")]
    ImageNotFound(#[from] std::io::Error),
    #[error("executable image is malformed: {reason}")]
    ImageMalformed { reason: String },
    #[error(transparent)]
    MemoryMap(#[from] MemoryMapError),
}
