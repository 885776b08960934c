//! Memory-section decoder.
//!
//! This is the one conditional section: which regions exist depends on the
//! machine kind, and the extended-memory region size on a RAM total derived
//! from two fields read mid-section. On XL/XE machines the ROM-image
//! regions are present regardless of the verbosity flag; `verbose` only
//! decides whether their bytes are retained, so the cursor advances by the
//! same amount either way.

use crate::error::{Result, SnapshotError};
use crate::format::{
    ATTRIB_LEN, BASIC_ROM_LEN, CART_SHADOW_LEN, MAIN_RAM_LEN, OS_ROM_LEN, UNDER_OS_LEN,
    XE_GAME_LEN,
};
use crate::io::StateReader;
use crate::types::DecodeContext;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryState {
    pub base_ram_kb: i32,
    /// Main 64 KiB address-space image.
    pub data: Vec<u8>,
    /// Per-address access-kind map, one byte per address.
    pub attrib: Vec<u8>,
    /// BASIC ROM image; retained only from verbose XL/XE states.
    pub basic_rom: Option<Vec<u8>>,
    /// RAM shadowed by the $A000-$BFFF cartridge window (XL/XE only).
    pub cart_shadow: Option<Vec<u8>>,
    /// OS ROM image; retained only from verbose XL/XE states.
    pub os_rom: Option<Vec<u8>>,
    /// RAM shadowed by the OS ROM (XL/XE only).
    pub under_os: Option<Vec<u8>>,
    /// Self-test / built-in game region; retained only from verbose XL/XE
    /// states.
    pub xe_game: Option<Vec<u8>>,
    pub num_xe_banks: i32,
    /// Total RAM derived from `base_ram_kb` and `num_xe_banks`; always 64
    /// or 128 on successful decode.
    pub ram_size_kb: i32,
    pub portb: u8,
    pub cart_a0bf_enabled: i32,
    /// Banked XE memory, present only when `ram_size_kb > 64`.
    pub xe_memory: Option<Vec<u8>>,
    /// Present on XL/XE machines with more than 20 KiB of RAM.
    pub enable_map_ram: Option<i32>,
}

impl MemoryState {
    pub fn decode(r: &mut StateReader<'_>, ctx: &DecodeContext) -> Result<Self> {
        let base_ram_kb = r.read_i32()?;
        let data = r.read_block(MAIN_RAM_LEN)?.to_vec();
        let attrib = r.read_block(ATTRIB_LEN)?.to_vec();

        let mut basic_rom = None;
        let mut cart_shadow = None;
        let mut os_rom = None;
        let mut under_os = None;
        let mut xe_game = None;
        if ctx.machine_kind.is_xlxe() {
            basic_rom = keep_if(ctx.verbose, r.read_block(BASIC_ROM_LEN)?);
            cart_shadow = Some(r.read_block(CART_SHADOW_LEN)?.to_vec());
            os_rom = keep_if(ctx.verbose, r.read_block(OS_ROM_LEN)?);
            under_os = Some(r.read_block(UNDER_OS_LEN)?.to_vec());
            xe_game = keep_if(ctx.verbose, r.read_block(XE_GAME_LEN)?);
        }

        let num_xe_banks = r.read_i32()?;

        let mut ram_size_kb = i64::from(base_ram_kb) + i64::from(num_xe_banks) * 16;
        if ram_size_kb == 320 {
            // A sum of exactly 320 carries one extra adjustment field.
            ram_size_kb += i64::from(r.read_i32()?);
        }
        if ram_size_kb != 64 && ram_size_kb != 128 {
            return Err(SnapshotError::InvalidMemoryLayout(ram_size_kb));
        }
        let ram_size_kb = ram_size_kb as i32;

        let portb = r.read_u8()?;
        let cart_a0bf_enabled = r.read_i32()?;

        let xe_memory = if ram_size_kb > 64 {
            let len = (1 + (ram_size_kb as usize - 64) / 16) * 16384;
            Some(r.read_block(len)?.to_vec())
        } else {
            None
        };

        let enable_map_ram = if ctx.machine_kind.is_xlxe() && ram_size_kb > 20 {
            Some(r.read_i32()?)
        } else {
            None
        };

        Ok(Self {
            base_ram_kb,
            data,
            attrib,
            basic_rom,
            cart_shadow,
            os_rom,
            under_os,
            xe_game,
            num_xe_banks,
            ram_size_kb,
            portb,
            cart_a0bf_enabled,
            xe_memory,
            enable_map_ram,
        })
    }
}

fn keep_if(keep: bool, block: &[u8]) -> Option<Vec<u8>> {
    keep.then(|| block.to_vec())
}
