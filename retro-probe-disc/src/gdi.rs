//! GDI track table parsing.
//!
//! A GDI file is a track count followed by one record per track:
//!
//! ```text
//! 3
//! 1 0 4 2352 track01.bin 0
//! 2 756 0 2352 track02.raw 0
//! 3 45000 4 2352 "track 03.bin" 0
//! ```
//!
//! Fields are track number, start LBA (unused here), type (0 = audio,
//! anything else = data), sector size, file name and byte offset.

use std::path::Path;

use retro_probe_core::{SectorSize, Track, TrackMode};

use crate::error::{LayoutError, LayoutResult};

/// Parse GDI text into tracks; file names resolve relative to `base_dir`.
pub fn parse_gdi(content: &str, base_dir: &Path) -> LayoutResult<Vec<Track>> {
    let mut lines = content.lines();

    let declared: u32 = lines
        .next()
        .map(str::trim)
        .and_then(|l| l.parse().ok())
        .ok_or_else(|| LayoutError::Malformed("missing GDI track count".into()))?;

    let mut tracks = Vec::new();
    for line in lines {
        let fields = split_record(line);
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 6 {
            return Err(LayoutError::Malformed(line.to_string()));
        }

        let number: u32 = parse_field(&fields[0], line)?;
        let type_flag: u32 = parse_field(&fields[2], line)?;
        let size: u32 = parse_field(&fields[3], line)?;
        let offset: u64 = parse_field(&fields[5], line)?;

        let mode = if type_flag == 0 {
            TrackMode::Audio
        } else {
            TrackMode::Mode1
        };
        // 2324 only exists as a sniffed Form 2 arrangement.
        let sector_size = SectorSize::from_bytes(size)
            .filter(|&s| s != SectorSize::Form2_2324)
            .ok_or(LayoutError::UnknownSectorSize(size))?;

        tracks.push(Track::new(
            number,
            base_dir.join(&fields[4]),
            offset,
            sector_size,
            mode,
        ));
    }

    if tracks.is_empty() {
        return Err(LayoutError::NoTracks);
    }
    if tracks.len() != declared as usize {
        log::debug!(
            "GDI declares {} tracks but lists {}",
            declared,
            tracks.len()
        );
    }
    Ok(tracks)
}

fn parse_field<T: std::str::FromStr>(field: &str, line: &str) -> LayoutResult<T> {
    field
        .parse()
        .map_err(|_| LayoutError::Malformed(line.to_string()))
}

/// Split a record on whitespace, keeping double-quoted runs together.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    fields.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() || quoted {
        fields.push(current);
    }
    fields
}
