//! Shared types for the retro-probe workspace.
//!
//! Holds the track model produced by the layout resolvers, the ordered field
//! map produced by format decoders, and the [`FormatDecoder`] trait the
//! dispatcher drives.

use std::borrow::Cow;

pub mod error;
pub mod fields;
pub mod layout;
pub mod platform;
pub mod track;
pub mod util;

pub use error::ProbeError;
pub use fields::{FieldMap, FieldValue, PLATFORM_KEY, TRACKS_KEY};
pub use layout::{Layout, LayoutKind};
pub use platform::{Platform, PlatformParseError};
pub use track::{SectorSize, Track, TrackList, TrackMode};

/// Sectors read from an optical data track; enough to cover the volume
/// descriptor at sector 16.
pub const DEFAULT_SECTOR_READ_COUNT: u64 = 17;

/// Upper bound for reading a flat (cartridge) file whole.
pub const DEFAULT_MAX_CARTRIDGE_BYTES: u64 = 64 * 1024 * 1024;

/// Options that control how much data a probe reads.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Sectors to read from the data track of a disc layout.
    pub sector_read_count: u64,

    /// Maximum bytes read from a file with no disc layout.
    pub max_cartridge_bytes: u64,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            sector_read_count: DEFAULT_SECTOR_READ_COUNT,
            max_cartridge_bytes: DEFAULT_MAX_CARTRIDGE_BYTES,
        }
    }
}

impl ProbeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sector_read_count(mut self, sectors: u64) -> Self {
        self.sector_read_count = sectors;
        self
    }

    pub fn max_cartridge_bytes(mut self, bytes: u64) -> Self {
        self.max_cartridge_bytes = bytes;
        self
    }
}

/// A candidate buffer after any per-family correction.
#[derive(Debug, Clone)]
pub struct PreparedBuffer<'a> {
    pub data: Cow<'a, [u8]>,
    /// Human-readable name of the correction applied, if any.
    pub correction: Option<&'static str>,
}

impl<'a> PreparedBuffer<'a> {
    /// The buffer as-is, nothing applied.
    pub fn unchanged(data: &'a [u8]) -> Self {
        Self {
            data: Cow::Borrowed(data),
            correction: None,
        }
    }

    /// A rewritten buffer and the name of the correction that produced it.
    pub fn corrected(data: Vec<u8>, correction: &'static str) -> Self {
        Self {
            data: Cow::Owned(data),
            correction: Some(correction),
        }
    }

    pub fn is_corrected(&self) -> bool {
        self.correction.is_some()
    }
}

/// A header decoder for one platform.
///
/// Implementors recognize a content signature and extract header fields. The
/// dispatcher owns file access and layout handling; decoders only see bytes.
pub trait FormatDecoder: Send + Sync {
    /// Returns the platform this decoder recognizes.
    fn platform(&self) -> Platform;

    /// File extensions (lowercase, no dot) this decoder accepts in `parse`.
    fn extensions(&self) -> &'static [&'static str];

    /// Check whether `data` carries this decoder's signature.
    fn validate(&self, data: &[u8]) -> bool;

    /// Extract header fields. Only called after `validate` accepted `data`.
    fn decode(&self, data: &[u8]) -> FieldMap;

    /// Undo any storage-level transform before validation.
    ///
    /// Override for platforms whose dumps exist in scrambled variants (for
    /// example copier interleaving). The default returns the data unchanged.
    /// A corrected buffer counts as recognized without calling `validate`:
    /// the detection that triggered the correction is this decoder's
    /// signature.
    fn prepare<'a>(&self, data: &'a [u8]) -> PreparedBuffer<'a> {
        PreparedBuffer::unchanged(data)
    }

    /// Choose which track of a resolved layout holds the header.
    ///
    /// Defaults to the first track.
    fn data_track<'a>(&self, layout: &'a Layout) -> &'a Track {
        layout.tracks.first()
    }

    /// Check if this decoder accepts a file extension (case-insensitive).
    fn accepts_extension(&self, ext: &str) -> bool {
        let lower = ext.to_lowercase();
        self.extensions().iter().any(|e| *e == lower)
    }
}
