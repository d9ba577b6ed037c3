use crate::device::Device;
use std::cell::Cell;

/// Any store of any size sets a boolean halt flag; the simulator container observes it through a
/// shared handle rather than a bare pointer into the device.
#[derive(Debug, Default)]
pub struct Halt {
    flag: Cell<bool>,
}

impl Halt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.flag.get()
    }
}

impl Device for Halt {
    fn load(&self, _offset: u32, out_buf: &mut [u8]) {
        out_buf.fill(0);
    }

    fn store(&self, _offset: u32, _in_buf: &[u8]) {
        log::trace!("halt flag set");
        self.flag.set(true);
    }
}
