use crate::device::Device;

/// Byte-based, read-only image storage.
///
/// Holds `size` bytes, of which the leading bytes are initialized from the constructor's `buf`
/// argument (only up to `size` bytes are copied from `buf`; the rest is ignored). Stores are
/// always silently ignored.
#[derive(Debug)]
pub struct Rom {
    data: Vec<u8>,
}

impl Rom {
    /// `size` must be at least one. Bytes beyond `buf`'s length (if `buf` is shorter than `size`)
    /// are zero-filled.
    pub fn new(size: u32, buf: &[u8]) -> Self {
        let size = size.max(1) as usize;
        let mut data = vec![0u8; size];
        let copy_len = buf.len().min(size);
        data[..copy_len].copy_from_slice(&buf[..copy_len]);
        log::trace!(size = size; "constructed ROM");
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Device for Rom {
    fn load(&self, offset: u32, out_buf: &mut [u8]) {
        let offset = offset as usize;
        if offset >= self.data.len() {
            out_buf.fill(0);
            log::trace!(offset = offset; "ROM load out of range, returning zero");
            return;
        }
        let available = self.data.len() - offset;
        let copy_len = out_buf.len().min(available);
        out_buf[..copy_len].copy_from_slice(&self.data[offset..offset + copy_len]);
        out_buf[copy_len..].fill(0);
    }

    fn store(&self, offset: u32, _in_buf: &[u8]) {
        log::trace!(offset = offset; "ignored store to ROM");
    }
}
