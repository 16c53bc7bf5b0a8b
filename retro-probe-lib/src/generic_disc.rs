//! ISO 9660 primary volume descriptor decoder.
//!
//! Recognizes any data disc with a standard volume descriptor at sector 16
//! (offset 0x8000 of the user data) and reports its identifier fields. Used
//! as the fallback when no console-specific decoder matches.

use retro_probe_core::util::{field, read_ascii_fixed};
use retro_probe_core::{FieldMap, FormatDecoder, PLATFORM_KEY, Platform};

/// Offset of the standard identifier inside the volume descriptor.
const STANDARD_ID_OFFSET: usize = 0x8001;

/// ISO 9660, ECMA-167 (UDF bridge) and CD-i identifiers.
const STANDARD_IDS: &[&[u8]] = &[b"CD001", b"BEA01", b"CD-I "];

/// Value of a date field that was never set.
const UNSET_DATE: &[u8] = b"0000000000000000\x00";

/// Format a 17-byte volume descriptor date as `YYYY-MM-DD hh:mm:ss.cc +HH:MM`.
///
/// The last byte is the signed zone offset in 15-minute units. Unset dates
/// (all zero digits, or all NUL) format as an empty string.
pub fn volume_date(raw: &[u8]) -> String {
    if raw.len() < 17 || raw == UNSET_DATE || raw.iter().all(|&b| b == 0) {
        return String::new();
    }
    let digits = |start: usize, len: usize| -> String {
        raw[start..start + len]
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { '?' })
            .collect()
    };
    // Signed quarter hours from GMT, -48 (west) to +52 (east).
    let zone_minutes = i32::from(raw[16] as i8) * 15;
    let sign = if zone_minutes < 0 { '-' } else { '+' };
    let zone_minutes = zone_minutes.unsigned_abs();
    format!(
        "{}-{}-{} {}:{}:{}.{} {}{:02}:{:02}",
        digits(0, 4),
        digits(4, 2),
        digits(6, 2),
        digits(8, 2),
        digits(10, 2),
        digits(12, 2),
        digits(14, 2),
        sign,
        zone_minutes / 60,
        zone_minutes % 60
    )
}

/// Decoder for generic ISO 9660 discs.
#[derive(Debug, Default)]
pub struct GenericDiscDecoder;

impl GenericDiscDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FormatDecoder for GenericDiscDecoder {
    fn platform(&self) -> Platform {
        Platform::GenericDisc
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["iso", "mdf", "img", "bin", "cue", "cdi", "gdi"]
    }

    fn validate(&self, data: &[u8]) -> bool {
        let id = field(data, STANDARD_ID_OFFSET, 5);
        STANDARD_IDS.iter().any(|known| *known == id)
    }

    fn decode(&self, data: &[u8]) -> FieldMap {
        let byte = |offset: usize| data.get(offset).copied().unwrap_or(0);

        let mut fields = FieldMap::new();
        fields.insert(PLATFORM_KEY, self.platform().display_name());
        fields.insert("standard_id", read_ascii_fixed(data, 0x8001, 5));
        fields.insert("system_id", read_ascii_fixed(data, 0x8008, 32));
        fields.insert("volume_id", read_ascii_fixed(data, 0x8028, 32));
        // sequence number / set size, low bytes of the big-endian halves
        fields.insert("set_info", format!("{}/{}", byte(0x807F), byte(0x807B)));
        fields.insert("volume_set_id", read_ascii_fixed(data, 0x80BE, 128));
        fields.insert("publisher_id", read_ascii_fixed(data, 0x813E, 128));
        fields.insert("data_preparer_id", read_ascii_fixed(data, 0x81BE, 128));
        fields.insert("application_id", read_ascii_fixed(data, 0x823E, 128));
        fields.insert("copyright_file_id", read_ascii_fixed(data, 0x82BE, 37));
        fields.insert("abstract_file_id", read_ascii_fixed(data, 0x82E3, 37));
        fields.insert("bibliographic_file_id", read_ascii_fixed(data, 0x8308, 37));
        fields.insert("creation_date", volume_date(field(data, 0x832D, 17)));
        fields.insert("modification_date", volume_date(field(data, 0x833E, 17)));
        fields.insert("expiration_date", volume_date(field(data, 0x834F, 17)));
        fields.insert("effective_date", volume_date(field(data, 0x8360, 17)));
        fields
    }
}
