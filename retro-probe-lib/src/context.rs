//! Format dispatch over an ordered set of decoders.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use retro_probe_core::util::extension_of;
use retro_probe_core::{
    FieldMap, FormatDecoder, Layout, Platform, ProbeError, ProbeOptions, TRACKS_KEY, Track,
};

/// Field a decoder's correction label is recorded under.
pub const FORMAT_KEY: &str = "format";

/// Metadata about a registered decoder.
#[derive(Debug, Clone)]
pub struct DecoderInfo {
    /// Platform identifier
    pub platform: Platform,
    /// Short name (e.g., "dreamcast", "megadrive")
    pub short_name: &'static str,
    /// Full platform name
    pub platform_name: &'static str,
    /// File extensions offered to this decoder by `parse`
    pub extensions: &'static [&'static str],
}

impl DecoderInfo {
    pub fn from_decoder(decoder: &dyn FormatDecoder) -> Self {
        let platform = decoder.platform();
        Self {
            platform,
            short_name: platform.short_name(),
            platform_name: platform.display_name(),
            extensions: decoder.extensions(),
        }
    }
}

/// A registered decoder with its metadata.
pub struct RegisteredDecoder {
    pub metadata: DecoderInfo,
    pub decoder: Box<dyn FormatDecoder>,
}

impl RegisteredDecoder {
    pub fn new<D: FormatDecoder + 'static>(decoder: D) -> Self {
        let metadata = DecoderInfo::from_decoder(&decoder);
        Self {
            metadata,
            decoder: Box::new(decoder),
        }
    }
}

/// Context holding the registered decoders, in the order they are tried.
///
/// Build it once, register decoders, then share it freely: parsing never
/// mutates the context, so concurrent calls need no locking.
pub struct ProbeContext {
    decoders: Vec<RegisteredDecoder>,
    options: ProbeOptions,
}

impl Default for ProbeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeContext {
    /// Create a new empty context with default options.
    pub fn new() -> Self {
        Self::with_options(ProbeOptions::default())
    }

    pub fn with_options(options: ProbeOptions) -> Self {
        Self {
            decoders: Vec::new(),
            options,
        }
    }

    /// Register a decoder. Decoders are tried in registration order.
    pub fn register<D: FormatDecoder + 'static>(&mut self, decoder: D) -> &mut Self {
        self.decoders.push(RegisteredDecoder::new(decoder));
        self
    }

    /// Get all registered decoders, in the order they are tried.
    pub fn decoders(&self) -> impl Iterator<Item = &RegisteredDecoder> {
        self.decoders.iter()
    }

    /// Keep only the decoders for `platforms`, preserving their order.
    pub fn retain_platforms(&mut self, platforms: &[Platform]) {
        self.decoders.retain(|d| platforms.contains(&d.metadata.platform));
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Identify the image at `path`.
    ///
    /// Disc layouts are resolved first; each decoder accepting the file's
    /// extension is then offered the user data of the track it selects, or
    /// for files without a layout the file itself. The first decoder to
    /// accept wins and its fields are returned with the track list attached.
    ///
    /// An empty map means no decoder recognized the file. Only a missing
    /// path or an I/O fault on the file itself is an error.
    pub fn parse(&self, path: &Path) -> Result<FieldMap, ProbeError> {
        let layout = retro_probe_disc::resolve(path)?;
        let ext = extension_of(path);

        let candidates: Vec<&RegisteredDecoder> = self
            .decoders
            .iter()
            .filter(|d| d.decoder.accepts_extension(&ext))
            .collect();
        if candidates.is_empty() {
            log::debug!("{}: no decoder handles .{}", path.display(), ext);
            return Ok(FieldMap::new());
        }

        let Some(layout) = layout else {
            let data = read_flat(path, self.options.max_cartridge_bytes)?;
            return Ok(candidates
                .iter()
                .find_map(|d| try_decoder(d, &data))
                .unwrap_or_default());
        };

        for candidate in candidates {
            let track = candidate.decoder.data_track(&layout);
            let data = match read_track(track, self.options.sector_read_count) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!(
                        "{}: cannot read track {} from {}: {}",
                        path.display(),
                        track.index,
                        track.source_path().display(),
                        e
                    );
                    continue;
                }
            };
            if let Some(mut fields) = try_decoder(candidate, &data) {
                attach_tracks(&mut fields, &layout);
                return Ok(fields);
            }
        }
        Ok(FieldMap::new())
    }

    /// Identify an in-memory buffer, offering it to every decoder in order.
    ///
    /// Returns an empty map when nothing matches.
    pub fn parse_buffer(&self, data: &[u8]) -> FieldMap {
        self.decoders
            .iter()
            .find_map(|d| try_decoder(d, data))
            .unwrap_or_default()
    }
}

/// Offer `data` to one decoder: prepare, validate, decode.
///
/// A buffer the decoder's `prepare` hook corrected is taken as recognized,
/// and the correction is recorded in the `format` field.
fn try_decoder(entry: &RegisteredDecoder, data: &[u8]) -> Option<FieldMap> {
    let decoder = entry.decoder.as_ref();
    let prepared = decoder.prepare(data);
    if !prepared.is_corrected() && !decoder.validate(&prepared.data) {
        return None;
    }

    log::debug!("Recognized as {}", entry.metadata.platform_name);
    let mut fields = decoder.decode(&prepared.data);
    if let Some(label) = prepared.correction {
        fields.insert(FORMAT_KEY, label);
    }
    Some(fields)
}

fn attach_tracks(fields: &mut FieldMap, layout: &Layout) {
    fields.insert(TRACKS_KEY, layout.tracks.clone());
}

/// Read up to `max_bytes` from the start of a file.
fn read_flat(path: &Path, max_bytes: u64) -> Result<Vec<u8>, ProbeError> {
    let mut data = Vec::new();
    File::open(path)?.take(max_bytes).read_to_end(&mut data)?;
    Ok(data)
}

/// Read `sectors` sectors of a track and reduce them to user data.
fn read_track(track: &Track, sectors: u64) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(track.source_path())?;
    file.seek(SeekFrom::Start(track.byte_offset))?;
    let mut raw = Vec::new();
    file.take(track.span(sectors)).read_to_end(&mut raw)?;
    Ok(retro_probe_disc::normalize(&raw, track.sector_size, track.mode).into_owned())
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
