//! Disc track model.
//!
//! A [`Track`] describes where one track's sector data starts inside some
//! file and how its sectors are laid out. Layout resolvers produce a
//! [`TrackList`], which is never empty.

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

/// Number of CD frames (sectors) per second of MSF time.
pub const FRAMES_PER_SECOND: u64 = 75;

/// Physical sector mode of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackMode {
    /// CD-DA audio
    Audio,
    /// Mode 1 data
    Mode1,
    /// Mode 2 (XA) data
    Mode2,
}

impl TrackMode {
    /// Numeric code used by the track tuple (0 = audio, 1, 2).
    pub fn code(&self) -> u8 {
        match self {
            Self::Audio => 0,
            Self::Mode1 => 1,
            Self::Mode2 => 2,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Audio),
            1 => Some(Self::Mode1),
            2 => Some(Self::Mode2),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Audio => "AUDIO",
            Self::Mode1 => "MODE1",
            Self::Mode2 => "MODE2",
        }
    }
}

impl Serialize for TrackMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Bytes per sector as stored in the image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectorSize {
    /// User data only (ISO-style "cooked" sectors)
    Cooked2048,
    /// XA Mode 2 Form 2 payload without sync/header/subheader
    Form2_2324,
    /// Sector without the 16-byte sync and header
    Raw2336,
    /// Full raw sector including sync, header and EDC/ECC
    Raw2352,
}

impl SectorSize {
    pub fn bytes(&self) -> u32 {
        match self {
            Self::Cooked2048 => 2048,
            Self::Form2_2324 => 2324,
            Self::Raw2336 => 2336,
            Self::Raw2352 => 2352,
        }
    }

    pub fn from_bytes(bytes: u32) -> Option<Self> {
        match bytes {
            2048 => Some(Self::Cooked2048),
            2324 => Some(Self::Form2_2324),
            2336 => Some(Self::Raw2336),
            2352 => Some(Self::Raw2352),
            _ => None,
        }
    }
}

impl Serialize for SectorSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bytes())
    }
}

/// Convert an `mm:ss:ff` position into a sector count.
///
/// Returns `None` if the position does not fit in a `u64`.
pub fn msf_to_sectors(minutes: u64, seconds: u64, frames: u64) -> Option<u64> {
    minutes
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(FRAMES_PER_SECOND)?
        .checked_add(frames)
}

/// One track of a disc image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    /// Ordinal position as declared by the layout (not necessarily 0-based).
    pub index: u32,
    /// File holding this track's sector data.
    #[serde(rename = "filename")]
    pub source_path: PathBuf,
    /// Offset of the first sector of the track, pregap already applied.
    #[serde(rename = "offset")]
    pub byte_offset: u64,
    pub sector_size: SectorSize,
    pub mode: TrackMode,
}

impl Track {
    pub fn new(
        index: u32,
        source_path: impl Into<PathBuf>,
        byte_offset: u64,
        sector_size: SectorSize,
        mode: TrackMode,
    ) -> Self {
        Self {
            index,
            source_path: source_path.into(),
            byte_offset,
            sector_size,
            mode,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Bytes to read for `sectors` sectors of this track, saturating.
    pub fn span(&self, sectors: u64) -> u64 {
        sectors.saturating_mul(self.sector_size.bytes() as u64)
    }
}

/// A non-empty, ordered sequence of tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrackList(Vec<Track>);

impl TrackList {
    /// Wrap a list of tracks. Returns `None` when `tracks` is empty.
    pub fn new(tracks: Vec<Track>) -> Option<Self> {
        if tracks.is_empty() {
            None
        } else {
            Some(Self(tracks))
        }
    }

    pub fn first(&self) -> &Track {
        &self.0[0]
    }

    pub fn last(&self) -> &Track {
        &self.0[self.0.len() - 1]
    }

    pub fn get(&self, position: usize) -> Option<&Track> {
        self.0.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a TrackList {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "tests/track_tests.rs"]
mod tests;
