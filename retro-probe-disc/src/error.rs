use thiserror::Error;

/// Why a layout description could not be turned into tracks.
///
/// Everything except [`LayoutError::Io`] means "not a usable layout" and is
/// reported to callers as no layout at all.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// I/O failure other than running out of data
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    /// The file ended before a structure was complete
    #[error("Layout data is truncated")]
    Truncated,

    /// CDI trailer carries an unknown version tag
    #[error("Unsupported image version 0x{0:08X}")]
    UnsupportedVersion(u32),

    /// CDI header offset is zero or points outside the file
    #[error("Bad header offset {0}")]
    BadHeaderOffset(u32),

    /// A CDI track entry is missing its start-of-track mark
    #[error("Track start mark not found for track {track}")]
    MissingTrackMark { track: u32 },

    /// A CDI sector-size class code outside the known table
    #[error("Unsupported sector size code {0}")]
    UnknownSectorSize(u32),

    /// A track mode outside audio / Mode 1 / Mode 2
    #[error("Unsupported track mode {0}")]
    UnknownMode(u32),

    /// A text layout line that could not be parsed
    #[error("Malformed layout line: {0}")]
    Malformed(String),

    /// The layout parsed but described no tracks
    #[error("Layout contains no tracks")]
    NoTracks,

    /// No volume descriptor signature at any probed offset
    #[error("No volume descriptor found")]
    NoVolumeDescriptor,
}

impl From<std::io::Error> for LayoutError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Io(e)
        }
    }
}

pub type LayoutResult<T> = Result<T, LayoutError>;
