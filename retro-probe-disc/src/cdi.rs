//! DiscJuggler (CDI) binary track index parsing.
//!
//! The track index sits near the end of the image. The last 8 bytes hold a
//! version tag and the offset of the index header (measured from the end of
//! the file for version 3.5, from the start otherwise). The index lists
//! sessions, each with a list of variable-length track entries; only a few
//! fields of each entry matter for locating sector data.

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use retro_probe_core::{SectorSize, Track, TrackMode};

use crate::error::{LayoutError, LayoutResult};

/// Marker preceding each track entry, present twice in a row.
pub const TRACK_START_MARK: [u8; 10] = [0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];

/// Extension marker introduced by DiscJuggler 4.
const DJ4_EXTRA_MARKER: u32 = 0x8000_0000;

/// Trailer marker for the extra block written by DiscJuggler 3.00.780+.
const DJ3_TRAILER_MARKER: u32 = 0xFFFF_FFFF;

/// Image format version, from the trailing version tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CdiVersion {
    V2,
    V3,
    V35,
}

impl CdiVersion {
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0x8000_0004 => Some(Self::V2),
            0x8000_0005 => Some(Self::V3),
            0x8000_0006 => Some(Self::V35),
            _ => None,
        }
    }
}

/// Resolve a sector-size class code.
fn sector_size_for_code(code: u32) -> Option<SectorSize> {
    match code {
        0 => Some(SectorSize::Cooked2048),
        1 => Some(SectorSize::Raw2336),
        2 => Some(SectorSize::Raw2352),
        _ => None,
    }
}

/// Little-endian cursor over the image with relative skips.
struct IndexReader<R> {
    inner: R,
}

impl<R: Read + Seek> IndexReader<R> {
    fn u8(&mut self) -> LayoutResult<u8> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn u16(&mut self) -> LayoutResult<u16> {
        let mut buf = [0u8; 2];
        self.inner.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn u32(&mut self) -> LayoutResult<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn bytes<const N: usize>(&mut self) -> LayoutResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn skip(&mut self, n: i64) -> LayoutResult<()> {
        self.inner.seek(SeekFrom::Current(n))?;
        Ok(())
    }
}

/// Parse the track index of a CDI image.
///
/// `image_path` becomes the source path of every track: all tracks of a CDI
/// image live in the image itself.
pub fn parse_cdi<R: Read + Seek>(reader: R, image_path: &Path) -> LayoutResult<Vec<Track>> {
    let mut r = IndexReader { inner: reader };

    let image_len = r.inner.seek(SeekFrom::End(0))?;
    if image_len < 8 {
        return Err(LayoutError::Truncated);
    }
    r.inner.seek(SeekFrom::End(-8))?;

    let tag = r.u32()?;
    let version = CdiVersion::from_tag(tag).ok_or(LayoutError::UnsupportedVersion(tag))?;

    let header_offset = r.u32()?;
    if header_offset == 0 {
        return Err(LayoutError::BadHeaderOffset(header_offset));
    }
    let header_pos = if version == CdiVersion::V35 {
        image_len
            .checked_sub(header_offset as u64)
            .ok_or(LayoutError::BadHeaderOffset(header_offset))?
    } else {
        header_offset as u64
    };
    if header_pos >= image_len {
        return Err(LayoutError::BadHeaderOffset(header_offset));
    }
    r.inner.seek(SeekFrom::Start(header_pos))?;

    let mut tracks = Vec::new();
    let mut running_offset: u64 = 0;
    let mut index: u32 = 0;

    let sessions = r.u16()?;
    for _ in 0..sessions {
        let track_count = r.u16()?;
        for _ in 0..track_count {
            if r.u32()? != 0 {
                r.skip(8)?;
            }
            for _ in 0..2 {
                if r.bytes::<10>()? != TRACK_START_MARK {
                    return Err(LayoutError::MissingTrackMark { track: index });
                }
            }
            r.skip(4)?;
            let name_len = r.u8()?;
            r.skip(name_len as i64 + 19)?;

            if r.u32()? == DJ4_EXTRA_MARKER {
                r.skip(8)?;
            }
            r.skip(2)?;
            let pregap = r.u32()?;
            r.skip(10)?;
            let mode_code = r.u32()?;
            r.skip(16)?;
            let total_sectors = r.u32()?;
            r.skip(16)?;
            let size_code = r.u32()?;

            let mode = TrackMode::from_code(mode_code).ok_or(LayoutError::UnknownMode(mode_code))?;
            let sector_size =
                sector_size_for_code(size_code).ok_or(LayoutError::UnknownSectorSize(size_code))?;
            let size = sector_size.bytes() as u64;

            tracks.push(Track::new(
                index,
                image_path,
                running_offset + pregap as u64 * size,
                sector_size,
                mode,
            ));
            running_offset += total_sectors as u64 * size;
            index += 1;

            r.skip(29)?;
            if version != CdiVersion::V2 {
                r.skip(5)?;
                if r.u32()? == DJ3_TRAILER_MARKER {
                    r.skip(78)?;
                }
            }
        }

        r.skip(12)?;
        if version != CdiVersion::V2 {
            r.skip(1)?;
        }
    }

    if tracks.is_empty() {
        return Err(LayoutError::NoTracks);
    }
    Ok(tracks)
}

#[cfg(test)]
#[path = "tests/cdi_tests.rs"]
mod tests;
