//! Decoder for the `ATARI800` emulator save-state format.
//!
//! A state file is a gzip-enveloped byte stream with a fixed section order
//! and no self-describing framing: which fields exist, and how large the
//! memory section is, depends on fields decoded earlier (machine kind,
//! verbosity flag, total RAM size). Decoding is a single forward pass with
//! no resynchronization markers, so the eager header and RAM-size checks
//! are the only defense against silent misalignment.
//!
//! The caller hands in the fully decompressed bytes; the compression
//! envelope is not this crate's concern.

mod error;
mod format;
mod io;
mod ram;
mod types;

pub use crate::error::{Result, SnapshotError};
pub use crate::format::{
    Stage, MACHINE_XLXE, MIN_SNAPSHOT_VERSION, SIO_SLOT_COUNT, SNAPSHOT_MAGIC,
};
pub use crate::io::StateReader;
pub use crate::ram::MemoryState;
pub use crate::types::{
    AnticState, CartridgeState, CpuState, DecodeContext, GtiaState, MachineDescriptor,
    MachineKind, SioSlot, Snapshot, XlXeFlags,
};

/// Decodes one snapshot from a fully decompressed buffer.
///
/// Trailing bytes after the final section are ignored; the compression
/// envelope delimits the stream.
pub fn read_snapshot(buf: &[u8]) -> Result<Snapshot> {
    decode_snapshot(&mut StateReader::new(buf))
}

/// Decodes one snapshot, leaving `r` positioned just past the final
/// section. Sections decode in fixed order; a failure at any stage aborts
/// the whole decode.
pub fn decode_snapshot(r: &mut StateReader<'_>) -> Result<Snapshot> {
    r.enter(Stage::Header);
    let magic = r.read_block(SNAPSHOT_MAGIC.len())?;
    if magic != SNAPSHOT_MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    let version = r.read_u8()?;
    if version < MIN_SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }
    let verbose = r.read_u8()? != 0;

    r.enter(Stage::Machine);
    let machine = MachineDescriptor::decode(r)?;
    let ctx = DecodeContext {
        machine_kind: machine.kind,
        verbose,
    };

    r.enter(Stage::Cartridge);
    let cartridge = CartridgeState::decode(r)?;

    r.enter(Stage::Sio);
    let mut sio: [SioSlot; SIO_SLOT_COUNT] = Default::default();
    for slot in &mut sio {
        *slot = SioSlot::decode(r)?;
    }

    r.enter(Stage::Antic);
    let antic = AnticState::decode(r)?;

    r.enter(Stage::Cpu);
    let cpu = CpuState::decode(r, &ctx)?;

    r.enter(Stage::Gtia);
    let gtia = GtiaState::decode(r)?;

    Ok(Snapshot {
        version,
        verbose,
        machine,
        cartridge,
        sio,
        antic,
        cpu,
        gtia,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    proptest! {
        // "Fuzz" the decoder. This is not a replacement for coverage-guided
        // fuzzing, but it does guard against panics on corrupted inputs.
        #[test]
        fn decoder_never_panics(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
            let _ = read_snapshot(&data);
        }

        // Same, but past the header checks so the section decoders run.
        #[test]
        fn decoder_never_panics_past_header(data in proptest::collection::vec(any::<u8>(), 0..8192)) {
            let mut buf = SNAPSHOT_MAGIC.to_vec();
            buf.push(MIN_SNAPSHOT_VERSION);
            buf.extend_from_slice(&data);
            let _ = read_snapshot(&buf);
        }
    }
}
