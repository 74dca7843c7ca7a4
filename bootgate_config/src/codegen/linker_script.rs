use std::{fs::OpenOptions, io::Write, path::Path};

use anyhow::Result;

use crate::Configuration;

/// Name of the generated linker script, relative to the output directory.
pub const LINKER_SCRIPT: &str = "memory.x";

/// Generates the linker script `memory.x`, which places the bootloader
/// in its flash region (below the settings page) and in the RAM left
/// free by the radio stack.
pub fn generate_linker_script(out_dir: &Path, configuration: &Configuration) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(out_dir.join(LINKER_SCRIPT))?;
    file.write_all(linker_script(configuration).as_bytes())?;
    Ok(())
}

pub fn linker_script(configuration: &Configuration) -> String {
    let flash = configuration.memory.bootloader_flash();
    let ram = configuration.memory.ram;
    format!(
        "MEMORY\n\
         {{\n\
             FLASH : ORIGIN = 0x{:08X}, LENGTH = {}K\n\
             RAM : ORIGIN = 0x{:08X}, LENGTH = {}K\n\
         }}\n",
        flash.origin,
        flash.size / 1024,
        ram.origin,
        ram.size / 1024,
    )
}
