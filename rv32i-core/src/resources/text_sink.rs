use crate::device::Device;
use crate::tick::Tickable;
use std::cell::RefCell;
use std::io::Write;

/// Single-byte MMIO output device: a store of size 1 at offset 0 emits one character.
///
/// Stores at any other offset, or of any other size, are dropped. Reads always return 0.
#[derive(Debug)]
pub struct TextSink {
    out: RefCell<Box<dyn Write>>,
}

impl TextSink {
    pub fn new(out: Box<dyn Write>) -> Self {
        Self { out: RefCell::new(out) }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }
}

impl Device for TextSink {
    fn load(&self, _offset: u32, out_buf: &mut [u8]) {
        out_buf.fill(0);
    }

    fn store(&self, offset: u32, in_buf: &[u8]) {
        if offset != 0 || in_buf.len() != 1 {
            log::trace!(offset = offset, size = in_buf.len(); "ignored non-byte text sink store");
            return;
        }
        let mut out = self.out.borrow_mut();
        let _ = out.write_all(in_buf);
    }
}

impl Tickable for TextSink {
    fn tick(&self) {
        let _ = self.out.borrow_mut().flush();
    }
}
