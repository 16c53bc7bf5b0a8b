//! Sega Saturn disc header decoder.
//!
//! The system ID occupies the first 256 bytes of the first data sector
//! (Disc Format Standards Specification Sheet, p. 13).

use retro_probe_core::util::{matches_at, read_ascii_fixed};
use retro_probe_core::{FieldMap, FormatDecoder, PLATFORM_KEY, Platform};

use crate::genesis::{join_codes, substr};

const HARDWARE_ID: &[u8] = b"SEGA SEGASATURN";

fn region_name(c: char) -> Option<&'static str> {
    match c {
        'J' => Some("Japan"),
        'T' => Some("Asia"), // Asia NTSC: Taiwan, Philippines, Korea
        'U' => Some("America"),
        'E' => Some("Europe"),
        _ => None,
    }
}

fn device_name(c: char) -> Option<&'static str> {
    match c {
        'J' => Some("Control Pad"),
        'A' => Some("Analog Controller"),
        'M' => Some("Mouse"),
        'K' => Some("Keyboard"),
        'S' => Some("Steering Controller"),
        'T' => Some("Multitap"),
        _ => None,
    }
}

/// Format a `YYYYMMDD` date code as `YYYY-MM-DD`.
pub(crate) fn release_date(code: &str) -> String {
    format!(
        "{}-{}-{}",
        substr(code, 0, 4),
        substr(code, 4, 2),
        substr(code, 6, 2)
    )
}

/// Decoder for Sega Saturn disc images.
#[derive(Debug, Default)]
pub struct SaturnDecoder;

impl SaturnDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FormatDecoder for SaturnDecoder {
    fn platform(&self) -> Platform {
        Platform::Saturn
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["iso", "mdf", "img", "bin", "cue", "cdi", "gdi"]
    }

    fn validate(&self, data: &[u8]) -> bool {
        matches_at(data, 0, HARDWARE_ID)
    }

    fn decode(&self, data: &[u8]) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(PLATFORM_KEY, self.platform().display_name());
        fields.insert("hardware_id", read_ascii_fixed(data, 0x00, 16));
        fields.insert("publisher", read_ascii_fixed(data, 0x10, 16));
        fields.insert("product_id", read_ascii_fixed(data, 0x20, 10));
        fields.insert("product_version", read_ascii_fixed(data, 0x2A, 6));
        fields.insert("release_date", release_date(&read_ascii_fixed(data, 0x30, 8)));

        // "CD-1/1": disc number out of set size after the media type
        let media_info_code = read_ascii_fixed(data, 0x38, 8);
        let media_info = substr(&media_info_code, 3, usize::MAX);
        fields.insert("media_info_code", media_info_code);
        fields.insert("media_info", media_info);

        let region_code = read_ascii_fixed(data, 0x40, 10);
        let region = join_codes(&region_code, region_name);
        fields.insert("region_code", region_code);
        fields.insert("region", region);

        let device_code = read_ascii_fixed(data, 0x50, 16);
        let devices = join_codes(&device_code, device_name);
        fields.insert("device_code", device_code);
        fields.insert("devices", devices);

        fields.insert("title", read_ascii_fixed(data, 0x60, 112));
        fields
    }
}
