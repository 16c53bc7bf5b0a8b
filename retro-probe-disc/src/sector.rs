//! Conversion of raw sectors to 2048-byte user-data sectors.

use std::borrow::Cow;

use retro_probe_core::{SectorSize, TrackMode};

/// Payload bytes in one logical sector.
pub const USER_DATA_SIZE: usize = 2048;

/// Bytes preceding the user data inside one raw sector.
///
/// Mode 1 raw sectors carry 12 sync bytes plus a 4-byte header; Mode 2 raw
/// sectors add an 8-byte subheader; 2336-byte Mode 2 sectors have the sync and
/// header already stripped. Anything else starts with user data.
pub fn header_skip(mode: TrackMode, size: SectorSize) -> usize {
    match (mode, size) {
        (TrackMode::Mode1, SectorSize::Raw2352) => 16,
        (TrackMode::Mode2, SectorSize::Raw2336) => 8,
        (TrackMode::Mode2, SectorSize::Raw2352) => 24,
        _ => 0,
    }
}

/// Strip sync, headers and error correction from raw sectors.
///
/// 2048-byte sectors are returned as-is. Otherwise each whole sector
/// contributes its 2048 user-data bytes and a trailing partial sector is
/// dropped, so the output is always `raw.len() / size * 2048` bytes long.
pub fn normalize(raw: &[u8], size: SectorSize, mode: TrackMode) -> Cow<'_, [u8]> {
    if size == SectorSize::Cooked2048 {
        return Cow::Borrowed(raw);
    }

    let sector = size.bytes() as usize;
    let skip = header_skip(mode, size);
    let mut out = Vec::with_capacity(raw.len() / sector * USER_DATA_SIZE);
    for chunk in raw.chunks_exact(sector) {
        out.extend_from_slice(&chunk[skip..skip + USER_DATA_SIZE]);
    }
    Cow::Owned(out)
}
