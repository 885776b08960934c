use crate::error::{Result, SnapshotError};
use crate::format::{Stage, MACHINE_XLXE};
use crate::io::StateReader;
use crate::ram::MemoryState;

/// Already-decoded header fields that later sections depend on.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext {
    pub machine_kind: MachineKind,
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineKind {
    /// The original 400/800 line.
    Other,
    /// The XL/XE line, which banks ROMs in and out of the address space.
    XlXe,
}

impl MachineKind {
    pub fn from_u8(v: u8) -> Self {
        if v == MACHINE_XLXE {
            MachineKind::XlXe
        } else {
            MachineKind::Other
        }
    }

    pub fn is_xlxe(self) -> bool {
        self == MachineKind::XlXe
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineDescriptor {
    pub is_pal: bool,
    pub kind: MachineKind,
    /// Present only on XL/XE machines.
    pub xl_flags: Option<XlXeFlags>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XlXeFlags {
    pub builtin_basic: bool,
    pub keyboard_leds: u8,
    pub f_keys: u8,
    pub jumper: u8,
    pub builtin_game: bool,
    pub keyboard_detached: bool,
}

impl MachineDescriptor {
    pub fn decode(r: &mut StateReader<'_>) -> Result<Self> {
        let is_pal = r.read_u8()? != 0;
        let kind = MachineKind::from_u8(r.read_u8()?);
        let xl_flags = if kind.is_xlxe() {
            Some(XlXeFlags {
                builtin_basic: r.read_u8()? != 0,
                keyboard_leds: r.read_u8()?,
                f_keys: r.read_u8()?,
                jumper: r.read_u8()?,
                builtin_game: r.read_u8()? != 0,
                keyboard_detached: r.read_u8()? != 0,
            })
        } else {
            None
        };
        Ok(Self {
            is_pal,
            kind,
            xl_flags,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartridgeState {
    /// On-disk cartridge kind tag; only 0 ("none") decodes.
    pub saved_type: i32,
}

impl CartridgeState {
    pub fn decode(r: &mut StateReader<'_>) -> Result<Self> {
        let saved_type = r.read_i32()?;
        if saved_type != 0 {
            return Err(SnapshotError::UnsupportedCartridgeFormat(saved_type));
        }
        Ok(Self { saved_type })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SioSlot {
    pub status: i32,
    /// Attached image path as raw bytes; empty means no file.
    pub filename: Vec<u8>,
}

impl SioSlot {
    pub fn decode(r: &mut StateReader<'_>) -> Result<Self> {
        Ok(Self {
            status: r.read_i32()?,
            filename: r.read_filename()?,
        })
    }
}

/// Display-list and scan-position registers. Fixed layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnticState {
    pub dmactl: u8,
    pub chactl: u8,
    pub hscrol: u8,
    pub vscrol: u8,
    pub pmbase: u8,
    pub chbase: u8,
    pub nmien: u8,
    pub nmist: u8,
    pub ir: u8,
    pub antic_mode: u8,
    pub dctr: u8,
    pub last_line: u8,
    pub need_dl: u8,
    pub vscrol_off: u8,
    pub dlist: u16,
    pub screen_addr: u16,
    pub xpos: i32,
    pub xpos_limit: i32,
    pub ypos: i32,
}

impl AnticState {
    pub fn decode(r: &mut StateReader<'_>) -> Result<Self> {
        Ok(Self {
            dmactl: r.read_u8()?,
            chactl: r.read_u8()?,
            hscrol: r.read_u8()?,
            vscrol: r.read_u8()?,
            pmbase: r.read_u8()?,
            chbase: r.read_u8()?,
            nmien: r.read_u8()?,
            nmist: r.read_u8()?,
            ir: r.read_u8()?,
            antic_mode: r.read_u8()?,
            dctr: r.read_u8()?,
            last_line: r.read_u8()?,
            need_dl: r.read_u8()?,
            vscrol_off: r.read_u8()?,
            dlist: r.read_u16()?,
            screen_addr: r.read_u16()?,
            xpos: r.read_i32()?,
            xpos_limit: r.read_i32()?,
            ypos: r.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuState {
    pub reg_a: u8,
    pub reg_p: u8,
    pub reg_s: u8,
    pub reg_x: u8,
    pub reg_y: u8,
    pub irq: u8,
    pub memory: MemoryState,
    pub pc: u16,
}

impl CpuState {
    pub fn decode(r: &mut StateReader<'_>, ctx: &DecodeContext) -> Result<Self> {
        let reg_a = r.read_u8()?;
        let reg_p = r.read_u8()?;
        let reg_s = r.read_u8()?;
        let reg_x = r.read_u8()?;
        let reg_y = r.read_u8()?;
        let irq = r.read_u8()?;

        // The memory section sits between the register file and the program
        // counter on disk.
        r.enter(Stage::Memory);
        let memory = MemoryState::decode(r, ctx)?;
        r.enter(Stage::Cpu);
        let pc = r.read_u16()?;

        Ok(Self {
            reg_a,
            reg_p,
            reg_s,
            reg_x,
            reg_y,
            irq,
            memory,
            pc,
        })
    }
}

/// Player/missile, collision, color and control registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GtiaState {
    pub hposp0: u8,
    pub hposp1: u8,
    pub hposp2: u8,
    pub hposp3: u8,
    pub hposm0: u8,
    pub hposm1: u8,
    pub hposm2: u8,
    pub hposm3: u8,

    pub pf0pm: u8,
    pub pf1pm: u8,
    pub pf2pm: u8,
    pub pf3pm: u8,

    pub m0pl: u8,
    pub m1pl: u8,
    pub m2pl: u8,
    pub m3pl: u8,
    pub p0pl: u8,
    pub p1pl: u8,
    pub p2pl: u8,
    pub p3pl: u8,

    pub sizep0: u8,
    pub sizep1: u8,
    pub sizep2: u8,
    pub sizep3: u8,
    pub sizem: u8,

    pub grafp0: u8,
    pub grafp1: u8,
    pub grafp2: u8,
    pub grafp3: u8,
    pub grafm: u8,

    pub colpm0: u8,
    pub colpm1: u8,
    pub colpm2: u8,
    pub colpm3: u8,
    pub colpf0: u8,
    pub colpf1: u8,
    pub colpf2: u8,
    pub colpf3: u8,
    pub colbk: u8,

    pub prior: u8,
    pub vdelay: u8,
    pub gractl: u8,
    pub consol_mask: u8,
    pub speaker: i32,
    pub trig_latch: i32,
}

impl GtiaState {
    pub fn decode(r: &mut StateReader<'_>) -> Result<Self> {
        let mut gtia = Self {
            hposp0: r.read_u8()?,
            hposp1: r.read_u8()?,
            hposp2: r.read_u8()?,
            hposp3: r.read_u8()?,
            hposm0: r.read_u8()?,
            hposm1: r.read_u8()?,
            hposm2: r.read_u8()?,
            hposm3: r.read_u8()?,
            pf0pm: r.read_u8()?,
            pf1pm: r.read_u8()?,
            pf2pm: r.read_u8()?,
            pf3pm: r.read_u8()?,
            m0pl: r.read_u8()?,
            m1pl: r.read_u8()?,
            m2pl: r.read_u8()?,
            m3pl: r.read_u8()?,
            p0pl: r.read_u8()?,
            p1pl: r.read_u8()?,
            p2pl: r.read_u8()?,
            p3pl: r.read_u8()?,
            sizep0: r.read_u8()?,
            sizep1: r.read_u8()?,
            sizep2: r.read_u8()?,
            sizep3: r.read_u8()?,
            sizem: r.read_u8()?,
            grafp0: r.read_u8()?,
            grafp1: r.read_u8()?,
            grafp2: r.read_u8()?,
            grafp3: r.read_u8()?,
            grafm: r.read_u8()?,
            colpm0: r.read_u8()?,
            colpm1: r.read_u8()?,
            colpm2: r.read_u8()?,
            colpm3: r.read_u8()?,
            colpf0: r.read_u8()?,
            colpf1: r.read_u8()?,
            colpf2: r.read_u8()?,
            colpf3: r.read_u8()?,
            colbk: r.read_u8()?,
            prior: r.read_u8()?,
            vdelay: r.read_u8()?,
            gractl: r.read_u8()?,
            consol_mask: r.read_u8()?,
            speaker: r.read_i32()?,
            trig_latch: 0,
        };
        // A 4-byte console-value slot sits between speaker and the trigger
        // latch; it carries no restorable state but must still be consumed.
        r.read_i32()?;
        gtia.trig_latch = r.read_i32()?;
        Ok(gtia)
    }
}

/// One fully decoded save state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub version: u8,
    pub verbose: bool,
    pub machine: MachineDescriptor,
    pub cartridge: CartridgeState,
    pub sio: [SioSlot; crate::format::SIO_SLOT_COUNT],
    pub antic: AnticState,
    pub cpu: CpuState,
    pub gtia: GtiaState,
}
