use thiserror::Error;

use crate::format::{Stage, MIN_SNAPSHOT_VERSION};

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("truncated input while decoding {stage} at byte offset {offset}")]
    TruncatedInput { stage: Stage, offset: usize },

    #[error("bad magic tag (not an ATARI800 state file)")]
    BadMagic,

    #[error("unsupported state version {} (minimum supported is {})", .0, MIN_SNAPSHOT_VERSION)]
    UnsupportedVersion(u8),

    #[error("unsupported cartridge format {0} (only cartridge-less states are readable)")]
    UnsupportedCartridgeFormat(i32),

    #[error("invalid memory layout: total ram size {0} KiB (expected 64 or 128)")]
    InvalidMemoryLayout(i64),
}
