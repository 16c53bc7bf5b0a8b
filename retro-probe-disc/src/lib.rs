//! Disc layout resolution and sector normalization.
//!
//! [`resolve`] turns a path into a [`Layout`] using the strategy its extension
//! selects. Structural problems with a layout file are not errors: the file is
//! simply not a multi-track layout and the caller reads it as a flat buffer.

pub mod cdi;
pub mod cue;
pub mod error;
pub mod gdi;
pub mod sector;
pub mod sniff;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use retro_probe_core::{Layout, LayoutKind, ProbeError, Track, TrackList};

pub use error::{LayoutError, LayoutResult};
pub use sector::{header_skip, normalize};

/// Resolve the track layout of `path`.
///
/// Returns `Ok(None)` when the extension names no layout strategy or the
/// layout is unusable (bad sentinel, unknown version, zero tracks, truncated
/// data). `Err` is reserved for a path that does not exist and for I/O faults
/// other than running out of data.
pub fn resolve(path: &Path) -> Result<Option<Layout>, ProbeError> {
    if !path.exists() {
        return Err(ProbeError::NotFound(path.to_path_buf()));
    }
    let Some(kind) = LayoutKind::from_path(path) else {
        return Ok(None);
    };

    match resolve_kind(kind, path) {
        Ok(tracks) => match TrackList::new(tracks) {
            Some(tracks) => {
                log::debug!(
                    "{}: {} with {} track(s)",
                    path.display(),
                    kind.name(),
                    tracks.len()
                );
                Ok(Some(Layout { kind, tracks }))
            }
            None => Ok(None),
        },
        Err(LayoutError::Io(e)) => Err(ProbeError::Io(e)),
        Err(e) => {
            log::debug!("{}: not a usable {}: {}", path.display(), kind.name(), e);
            Ok(None)
        }
    }
}

/// Run one layout strategy against `path`.
pub fn resolve_kind(kind: LayoutKind, path: &Path) -> LayoutResult<Vec<Track>> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    match kind {
        LayoutKind::Cuesheet => cue::parse_cue(&read_text(path)?, base_dir),
        LayoutKind::LineTable => gdi::parse_gdi(&read_text(path)?, base_dir),
        LayoutKind::BinaryIndex => cdi::parse_cdi(BufReader::new(File::open(path)?), path),
        LayoutKind::Sniffed => sniff::sniff_image(File::open(path)?, path),
    }
}

/// Read a text layout, tolerating stray non-UTF-8 bytes in file names.
fn read_text(path: &Path) -> LayoutResult<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
