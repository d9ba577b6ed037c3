//! The processor core: architectural state plus the fetch/decode/execute/commit pipeline.

mod execute;

use crate::instruction::Instruction;
use crate::memory_map::MemoryMap;
use crate::registers::{ArchState, Registers};
use crate::tick::Tickable;
use std::cell::RefCell;
use std::rc::Rc;

/// Holds the architectural state and a handle to the memory map it fetches and accesses through.
///
/// Mutation happens through a `RefCell`, mirroring every other tickable/addressable component in
/// this simulator: the only thing that ever needs an exclusive `&mut` is the simulator container
/// itself, during construction.
#[derive(Debug)]
pub struct Processor {
    registers: RefCell<Registers>,
    memory_map: Rc<MemoryMap>,
}

impl Processor {
    pub fn new(entry_point: u32, memory_map: Rc<MemoryMap>) -> Self {
        Self {
            registers: RefCell::new(Registers::new(entry_point)),
            memory_map,
        }
    }

    pub fn arch_state(&self) -> ArchState {
        self.registers.borrow().arch_state()
    }

    pub fn set_arch_state(&self, state: ArchState) {
        self.registers.borrow_mut().set_arch_state(state);
    }

    pub fn memory_map(&self) -> &MemoryMap {
        &self.memory_map
    }
}

impl Tickable for Processor {
    /// Execute exactly one instruction: fetch, decode, execute, commit, as a single atomic step.
    fn tick(&self) {
        let pc = self.registers.borrow().pc();

        let mut raw = [0u8; 4];
        self.memory_map.load(pc, &mut raw);
        let raw_instruction = u32::from_le_bytes(raw);

        let instruction = Instruction::decode(raw_instruction);
        log::trace!(instruction:? = instruction; "executing instruction at pc={pc:#010x}");

        let mut registers = self.registers.borrow_mut();
        execute::execute(&instruction, &mut registers, &self.memory_map);
    }
}
