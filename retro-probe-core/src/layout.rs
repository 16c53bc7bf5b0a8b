//! Disc layout descriptions.

use std::path::Path;

use crate::track::TrackList;
use crate::util::extension_of;

/// Which kind of layout description a file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// Text cuesheet (`.cue`)
    Cuesheet,
    /// GD-ROM line-record track table (`.gdi`)
    LineTable,
    /// DiscJuggler versioned binary index (`.cdi`)
    BinaryIndex,
    /// Raw image with no layout file, inferred from volume descriptor magic
    Sniffed,
}

/// Extensions probed for a volume descriptor when no layout file exists.
pub const SNIFFED_EXTENSIONS: &[&str] = &["iso", "mdf", "img", "bin", "raw"];

impl LayoutKind {
    /// Pick a layout kind from a file extension (case-insensitive).
    ///
    /// Returns `None` for anything that is not a disc layout; such files are
    /// read directly as flat buffers.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "cue" => Some(Self::Cuesheet),
            "gdi" => Some(Self::LineTable),
            "cdi" => Some(Self::BinaryIndex),
            e if SNIFFED_EXTENSIONS.contains(&e) => Some(Self::Sniffed),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(&extension_of(path))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cuesheet => "CUE sheet",
            Self::LineTable => "GDI track table",
            Self::BinaryIndex => "CDI image",
            Self::Sniffed => "raw disc image",
        }
    }
}

/// A resolved layout: where the tracks are and how they were described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub kind: LayoutKind,
    pub tracks: TrackList,
}
