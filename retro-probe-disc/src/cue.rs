//! CUE sheet layout parsing.
//!
//! Only the commands that place tracks matter here: `FILE` selects the file
//! the following tracks live in, `TRACK` fixes the sector layout, and
//! `INDEX 01` commits the track at its start position. `INDEX 00` (the
//! pregap) and everything else (REM, PREGAP, FLAGS, ...) is ignored.

use std::path::{Path, PathBuf};

use retro_probe_core::track::msf_to_sectors;
use retro_probe_core::{SectorSize, Track, TrackMode};

use crate::error::{LayoutError, LayoutResult};

/// Map a TRACK mode tag to its sector layout.
pub fn track_layout(tag: &str) -> Option<(TrackMode, SectorSize)> {
    match tag.to_uppercase().as_str() {
        "AUDIO" => Some((TrackMode::Audio, SectorSize::Raw2352)),
        "MODE1/2048" => Some((TrackMode::Mode1, SectorSize::Cooked2048)),
        "MODE1/2352" => Some((TrackMode::Mode1, SectorSize::Raw2352)),
        "MODE2/2336" | "CDI/2336" => Some((TrackMode::Mode2, SectorSize::Raw2336)),
        "MODE2/2352" | "CDI/2352" => Some((TrackMode::Mode2, SectorSize::Raw2352)),
        _ => None,
    }
}

/// A track opened by `TRACK` and not yet committed by `INDEX 01`.
struct OpenTrack {
    number: u32,
    layout: Option<(TrackMode, SectorSize)>,
}

/// Parse CUE sheet text into tracks.
///
/// `base_dir` is the directory of the sheet; `FILE` names are resolved
/// relative to it.
pub fn parse_cue(content: &str, base_dir: &Path) -> LayoutResult<Vec<Track>> {
    let mut tracks = Vec::new();
    let mut current_file: Option<PathBuf> = None;
    let mut open: Option<OpenTrack> = None;

    for line in content.lines() {
        let line = line.trim();
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command.to_uppercase().as_str() {
            "FILE" => {
                let name = parse_file_name(line)?;
                current_file = Some(base_dir.join(name));
            }
            "TRACK" => {
                let (Some(number), Some(tag)) = (parts.next(), parts.next()) else {
                    return Err(LayoutError::Malformed(line.to_string()));
                };
                let number = number
                    .parse()
                    .map_err(|_| LayoutError::Malformed(line.to_string()))?;
                let layout = track_layout(tag);
                if layout.is_none() {
                    log::debug!("CUE: track {} has unsupported mode {}", number, tag);
                }
                open = Some(OpenTrack { number, layout });
            }
            "INDEX" => {
                let (Some(index), Some(position)) = (parts.next(), parts.next()) else {
                    return Err(LayoutError::Malformed(line.to_string()));
                };
                let index: u32 = index
                    .parse()
                    .map_err(|_| LayoutError::Malformed(line.to_string()))?;
                if index != 1 {
                    continue;
                }
                let sectors = parse_msf(position)
                    .ok_or_else(|| LayoutError::Malformed(line.to_string()))?;

                // A track is committed once; later INDEX 01 lines without a
                // new TRACK have nothing to attach to.
                let Some(track) = open.take() else {
                    continue;
                };
                let (Some((mode, sector_size)), Some(file)) = (track.layout, &current_file)
                else {
                    continue;
                };
                let byte_offset = sectors
                    .checked_mul(sector_size.bytes() as u64)
                    .ok_or_else(|| LayoutError::Malformed(line.to_string()))?;
                tracks.push(Track::new(
                    track.number,
                    file.clone(),
                    byte_offset,
                    sector_size,
                    mode,
                ));
            }
            _ => {}
        }
    }

    if tracks.is_empty() {
        return Err(LayoutError::NoTracks);
    }
    Ok(tracks)
}

/// Extract the file name of a `FILE "name" TYPE` line.
///
/// Quoted names may contain spaces; unquoted names end at the first space.
fn parse_file_name(line: &str) -> LayoutResult<String> {
    let rest = line.get(4..).unwrap_or("").trim_start();
    if let Some(after_quote) = rest.strip_prefix('"') {
        let end = after_quote
            .find('"')
            .ok_or_else(|| LayoutError::Malformed(line.to_string()))?;
        Ok(after_quote[..end].to_string())
    } else {
        rest.split_whitespace()
            .next()
            .map(str::to_string)
            .ok_or_else(|| LayoutError::Malformed(line.to_string()))
    }
}

/// Parse an `mm:ss:ff` position into a sector count; `None` if malformed or
/// out of range.
fn parse_msf(position: &str) -> Option<u64> {
    let mut fields = position.split(':').map(|p| p.parse::<u64>().ok());
    let (Some(Some(m)), Some(Some(s)), Some(Some(f)), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return None;
    };
    msf_to_sectors(m, s, f)
}

#[cfg(test)]
#[path = "tests/cue_tests.rs"]
mod tests;
