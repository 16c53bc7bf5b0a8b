//! Sega Dreamcast disc header decoder.
//!
//! The IP.BIN header sits at the start of the high-density data track (GD-ROM
//! Format Basic Specifications v2.14, p. 12). For GD-ROM dumps that is the
//! third track; for CDI images it is the last track.

use retro_probe_core::util::{matches_at, read_ascii_fixed};
use retro_probe_core::{
    FieldMap, FormatDecoder, Layout, LayoutKind, PLATFORM_KEY, Platform, Track,
};

use crate::genesis::{join_codes, substr};
use crate::saturn::release_date;

const HARDWARE_ID: &[u8] = b"SEGA SEGAKATANA";

/// Position of the high-density area's first track in a GD-ROM layout.
const HIGH_DENSITY_TRACK: usize = 2;

fn region_name(c: char) -> Option<&'static str> {
    match c {
        'J' => Some("Asia"),
        'U' => Some("America"),
        'E' => Some("Europe"),
        _ => None,
    }
}

/// Peripheral bits of the hex-encoded compatibility field at 0x38.
const PERIPHERAL_BITS: &[(u32, &str)] = &[
    (1 << 0, "Uses Windows CE"),
    (1 << 4, "VGA box support"),
    // expansion units
    (1 << 8, "Other expansions"),
    (1 << 9, "Puru Puru pack"),
    (1 << 10, "Mike device"),
    (1 << 11, "Memory card"),
    // required peripherals
    (1 << 12, "Start/A/B/Directions"),
    (1 << 13, "C button"),
    (1 << 14, "D button"),
    (1 << 15, "X button"),
    (1 << 16, "Y button"),
    (1 << 17, "Z button"),
    (1 << 18, "Expanded direction buttons"),
    (1 << 19, "Analog R trigger"),
    (1 << 20, "Analog L trigger"),
    (1 << 21, "Analog horizontal controller"),
    (1 << 22, "Analog vertical controller"),
    (1 << 23, "Expanded analog horizontal"),
    (1 << 24, "Expanded analog vertical"),
    // optional peripherals
    (1 << 25, "Gun"),
    (1 << 26, "Keyboard"),
    (1 << 27, "Mouse"),
];

/// Names of the peripherals set in a hex device code. A code that is not
/// valid hex names none.
pub fn peripherals(code: &str) -> String {
    let Ok(mask) = u32::from_str_radix(code, 16) else {
        return String::new();
    };
    PERIPHERAL_BITS
        .iter()
        .filter(|(bit, _)| mask & bit == *bit)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decoder for Sega Dreamcast disc images.
#[derive(Debug, Default)]
pub struct DreamcastDecoder;

impl DreamcastDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FormatDecoder for DreamcastDecoder {
    fn platform(&self) -> Platform {
        Platform::Dreamcast
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["cdi", "gdi", "cue"]
    }

    fn validate(&self, data: &[u8]) -> bool {
        matches_at(data, 0, HARDWARE_ID)
    }

    fn data_track<'a>(&self, layout: &'a Layout) -> &'a Track {
        match layout.kind {
            LayoutKind::BinaryIndex => layout.tracks.last(),
            _ => layout
                .tracks
                .get(HIGH_DENSITY_TRACK)
                .unwrap_or_else(|| layout.tracks.first()),
        }
    }

    fn decode(&self, data: &[u8]) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(PLATFORM_KEY, self.platform().display_name());
        fields.insert("hardware_id", read_ascii_fixed(data, 0x00, 16));
        fields.insert("hardware_vendor_id", read_ascii_fixed(data, 0x10, 16));
        fields.insert("media_id", read_ascii_fixed(data, 0x20, 5));

        // "GD-ROM1/1": disc number out of set size
        let media_info_code = read_ascii_fixed(data, 0x25, 11);
        let media_info = substr(&media_info_code, 6, usize::MAX);
        fields.insert("media_info_code", media_info_code);
        fields.insert("media_info", media_info);

        let region_code = read_ascii_fixed(data, 0x30, 8);
        let region = join_codes(&region_code, region_name);
        fields.insert("region_code", region_code);
        fields.insert("region", region);

        let device_code = read_ascii_fixed(data, 0x38, 8);
        let devices = peripherals(&device_code);
        fields.insert("device_code", device_code);
        fields.insert("devices", devices);

        fields.insert("product_id", read_ascii_fixed(data, 0x40, 10));
        fields.insert("product_version", read_ascii_fixed(data, 0x4A, 6));
        fields.insert("release_date", release_date(&read_ascii_fixed(data, 0x50, 8)));
        fields.insert("bootfile", read_ascii_fixed(data, 0x60, 12));
        fields.insert("publisher", read_ascii_fixed(data, 0x70, 16));
        fields.insert("title", read_ascii_fixed(data, 0x80, 96));
        fields
    }
}

#[cfg(test)]
#[path = "tests/dreamcast_tests.rs"]
mod tests;
