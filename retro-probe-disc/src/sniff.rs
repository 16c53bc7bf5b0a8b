//! Track inference for raw images with no layout file.
//!
//! A data track carries an ISO 9660 (`CD001`) or UDF (`BEA01`) volume
//! descriptor at sector 16. Where its signature lands depends on the sector
//! size and on the per-sector header, so each known arrangement is probed at
//! its own offset.

use std::io::Read;
use std::path::Path;

use retro_probe_core::{SectorSize, Track, TrackMode};

use crate::error::{LayoutError, LayoutResult};

/// Bytes read from the start of the image before probing.
pub const SNIFF_WINDOW: usize = 17 * 2352;

const ISO_MAGIC: &[u8] = b"CD001";
const UDF_MAGIC: &[u8] = b"BEA01";
const CDI_MAGIC: &[u8] = b"CD-I ";

struct Probe {
    mode: TrackMode,
    sector_size: SectorSize,
    offset: usize,
    magics: &'static [&'static [u8]],
}

const PROBES: &[Probe] = &[
    Probe {
        mode: TrackMode::Mode1,
        sector_size: SectorSize::Cooked2048,
        offset: 0x8001,
        magics: &[ISO_MAGIC, UDF_MAGIC],
    },
    Probe {
        mode: TrackMode::Mode1,
        sector_size: SectorSize::Raw2336,
        offset: 0x9211,
        magics: &[ISO_MAGIC, UDF_MAGIC],
    },
    Probe {
        mode: TrackMode::Mode1,
        sector_size: SectorSize::Raw2352,
        offset: 0x9311,
        magics: &[ISO_MAGIC, UDF_MAGIC],
    },
    Probe {
        mode: TrackMode::Mode2,
        sector_size: SectorSize::Cooked2048,
        offset: 0x8019,
        magics: &[ISO_MAGIC, UDF_MAGIC],
    },
    Probe {
        mode: TrackMode::Mode2,
        sector_size: SectorSize::Form2_2324,
        offset: 0x8bb9,
        magics: &[ISO_MAGIC, UDF_MAGIC],
    },
    Probe {
        mode: TrackMode::Mode2,
        sector_size: SectorSize::Raw2336,
        offset: 0x9219,
        magics: &[ISO_MAGIC, UDF_MAGIC, CDI_MAGIC],
    },
    Probe {
        mode: TrackMode::Mode2,
        sector_size: SectorSize::Raw2352,
        offset: 0x9319,
        magics: &[ISO_MAGIC, UDF_MAGIC, CDI_MAGIC],
    },
];

/// Find the (mode, sector size) whose probe offset holds a known signature.
///
/// Probes are tried in a fixed order and the first hit wins.
pub fn detect_arrangement(window: &[u8]) -> Option<(TrackMode, SectorSize)> {
    PROBES.iter().find_map(|probe| {
        let hit = probe.magics.iter().any(|magic| {
            window
                .get(probe.offset..probe.offset + magic.len())
                .is_some_and(|found| found == *magic)
        });
        hit.then_some((probe.mode, probe.sector_size))
    })
}

/// Infer a single data track for a raw image.
pub fn sniff_image<R: Read>(reader: R, image_path: &Path) -> LayoutResult<Vec<Track>> {
    let mut window = Vec::with_capacity(SNIFF_WINDOW);
    reader.take(SNIFF_WINDOW as u64).read_to_end(&mut window)?;

    let (mode, sector_size) =
        detect_arrangement(&window).ok_or(LayoutError::NoVolumeDescriptor)?;
    log::debug!(
        "Sniffed {} as {} with {}-byte sectors",
        image_path.display(),
        mode.name(),
        sector_size.bytes()
    );
    Ok(vec![Track::new(0, image_path, 0, sector_size, mode)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_with(offset: usize, magic: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; SNIFF_WINDOW];
        buf[offset..offset + magic.len()].copy_from_slice(magic);
        buf
    }

    #[test]
    fn every_probe_offset() {
        let cases = [
            (0x8001, TrackMode::Mode1, SectorSize::Cooked2048),
            (0x9211, TrackMode::Mode1, SectorSize::Raw2336),
            (0x9311, TrackMode::Mode1, SectorSize::Raw2352),
            (0x8019, TrackMode::Mode2, SectorSize::Cooked2048),
            (0x8bb9, TrackMode::Mode2, SectorSize::Form2_2324),
            (0x9219, TrackMode::Mode2, SectorSize::Raw2336),
            (0x9319, TrackMode::Mode2, SectorSize::Raw2352),
        ];
        for (offset, mode, size) in cases {
            assert_eq!(
                detect_arrangement(&window_with(offset, b"CD001")),
                Some((mode, size)),
                "offset 0x{offset:x}"
            );
            assert_eq!(
                detect_arrangement(&window_with(offset, b"BEA01")),
                Some((mode, size)),
                "offset 0x{offset:x}"
            );
        }
    }

    #[test]
    fn cd_i_only_for_raw_mode2() {
        assert_eq!(
            detect_arrangement(&window_with(0x9319, b"CD-I ")),
            Some((TrackMode::Mode2, SectorSize::Raw2352))
        );
        assert_eq!(
            detect_arrangement(&window_with(0x9219, b"CD-I ")),
            Some((TrackMode::Mode2, SectorSize::Raw2336))
        );
        assert_eq!(detect_arrangement(&window_with(0x8001, b"CD-I ")), None);
    }

    #[test]
    fn first_probe_wins() {
        let mut buf = window_with(0x9319, b"CD001");
        buf[0x8001..0x8006].copy_from_slice(b"CD001");
        assert_eq!(
            detect_arrangement(&buf),
            Some((TrackMode::Mode1, SectorSize::Cooked2048))
        );
    }

    #[test]
    fn short_or_blank_window() {
        assert_eq!(detect_arrangement(&[]), None);
        assert_eq!(detect_arrangement(&vec![0u8; SNIFF_WINDOW]), None);
        // signature cut off by the end of the data
        let mut buf = vec![0u8; 0x8003];
        buf[0x8001..0x8003].copy_from_slice(b"CD");
        assert_eq!(detect_arrangement(&buf), None);
    }

    #[test]
    fn sniffed_track_shape() {
        let data = window_with(0x9319, b"CD001");
        let tracks = sniff_image(data.as_slice(), Path::new("/roms/game.bin")).unwrap();
        assert_eq!(tracks.len(), 1);
        let track = &tracks[0];
        assert_eq!(track.index, 0);
        assert_eq!(track.byte_offset, 0);
        assert_eq!(track.mode, TrackMode::Mode2);
        assert_eq!(track.sector_size, SectorSize::Raw2352);
        assert_eq!(track.source_path, Path::new("/roms/game.bin"));
    }

    #[test]
    fn no_descriptor() {
        let data = vec![0u8; 1024];
        assert!(matches!(
            sniff_image(data.as_slice(), Path::new("x.iso")),
            Err(LayoutError::NoVolumeDescriptor)
        ));
    }
}
