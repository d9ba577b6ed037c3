//! Turns a file on disk into a `(image bytes, entry point)` pair the simulator can load into ROM.

use goblin::elf::program_header::PT_LOAD;
use log::debug;

/// Load `path` as an ELF image if possible, falling back to treating it as a flat raw binary
/// loaded at offset 0 with entry point 0 if it isn't a valid ELF.
///
/// The returned buffer is exactly `rom_size` bytes; segments (or the flat image) that don't fit
/// are truncated to the available space.
pub fn load(path: &str, rom_size: u32) -> Result<(Vec<u8>, u32), std::io::Error> {
    let raw = std::fs::read(path)?;
    let rom_size = rom_size as usize;

    match goblin::elf::Elf::parse(&raw) {
        Ok(elf) => {
            let mut image = vec![0u8; rom_size];
            for header in elf.program_headers.iter().filter(|h| h.p_type == PT_LOAD) {
                let paddr = header.p_paddr as usize;
                if paddr >= rom_size {
                    continue;
                }
                let src = &raw[header.file_range()];
                let copy_len = src.len().min(rom_size - paddr);
                debug!(len = copy_len; "loading ELF segment at paddr={paddr:#010x}");
                image[paddr..paddr + copy_len].copy_from_slice(&src[..copy_len]);
            }
            Ok((image, elf.entry as u32))
        }
        Err(_) => {
            debug!("input is not a valid ELF, treating as a flat raw binary");
            let copy_len = raw.len().min(rom_size);
            let mut image = vec![0u8; rom_size];
            image[..copy_len].copy_from_slice(&raw[..copy_len]);
            Ok((image, 0))
        }
    }
}
