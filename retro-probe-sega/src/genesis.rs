//! Sega Mega Drive / Genesis header decoder.
//!
//! Supports:
//! - Plain cartridge dumps (.md, .gen, .bin, .32x, ...)
//! - Copier-interleaved dumps (.smd and headerless Multi Game Doctor files)
//! - Sega CD / Mega CD boot sectors, whose header shares the cartridge layout

use retro_probe_core::util::{field, matches_at, read_ascii_fixed};
use retro_probe_core::{FieldMap, FormatDecoder, PLATFORM_KEY, Platform, PreparedBuffer};

use crate::interleave;
use crate::publisher::publisher_name;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const CONSOLE_NAME_OFFSET: usize = 0x100;

/// Console names accepted at 0x100.
const CONSOLE_NAMES: &[&[u8]] = &[
    b"SEGA MEGA DRIVE",
    b"SEGA_MEGA_DRIVE",
    b"SEGA GENESIS",
    b"SEGA 32X",
    b"SEGA PICO",
];

/// Disc identifiers at 0x000 of a Sega CD boot sector.
const SEGA_CD_IDS: &[&[u8]] = &[b"SEGADISCSYSTEM", b"SEGABOOTDISC", b"SEGADATADISC", b"SEGADISC"];

/// `format` value for Sega CD boot sectors.
pub const SEGA_CD_FORMAT: &str = "Sega CD";

// ---------------------------------------------------------------------------
// Code tables
// ---------------------------------------------------------------------------

/// Old-style region letters.
fn region_letter(c: char) -> Option<&'static str> {
    match c {
        'J' => Some("Asia"),    // Japan, Korea, Asian NTSC
        'U' => Some("America"), // North American NTSC, Brazilian PAL-M
        'E' => Some("Europe"),  // European PAL
        _ => None,
    }
}

/// New-style region bits, a single hex digit.
const REGION_BITS: &[(u32, &str)] = &[
    (0b0001, "Domestic, NTSC (Japan)"),
    (0b0010, "Domestic, PAL"),
    (0b0100, "Overseas, NTSC (America)"),
    (0b1000, "Overseas, PAL (Europe)"),
];

fn device_name(c: char) -> Option<&'static str> {
    match c {
        'J' => Some("3B Joypad"),
        '6' => Some("6B Joypad"),
        'K' => Some("Keyboard"),
        'P' => Some("Printer"),
        'B' => Some("Control Ball"),
        'F' => Some("Floppy Drive"),
        'L' => Some("Activator"),
        '4' => Some("Multitap"),
        '0' => Some("MS Joypad"),
        'R' => Some("RS232C Serial"),
        'T' => Some("Tablet"),
        'V' => Some("Paddle"),
        'C' => Some("CD-ROM"),
        'M' => Some("Mega Mouse"),
        'G' => Some("Menacer"),
        'A' => Some("Analog joystick"),
        'D' => Some("Download"),
        _ => None,
    }
}

fn modem_support(code: &str) -> &'static str {
    match code {
        "00" => "Japan no mic",
        "10" => "Japan with mic",
        "20" => "Overseas no mic",
        "30" => "Overseas with mic",
        "40" => "Japan no mic, Overseas no mic",
        "50" => "Japan with mic, Overseas with mic",
        "60" => "Japan no mic, Overseas with mic",
        "70" => "Japan with mic, Overseas no mic",
        "80" | "90" => "Reserved",
        _ => "",
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Join the names of every character of `code` found by `lookup`.
pub(crate) fn join_codes(code: &str, lookup: fn(char) -> Option<&'static str>) -> String {
    code.chars()
        .filter_map(lookup)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode a region field: letter codes, or failing that a hex bitmask.
fn decode_region(code: &str) -> String {
    let region = join_codes(code, region_letter);
    if code.is_empty() || !region.is_empty() {
        return region;
    }
    match u32::from_str_radix(code, 16) {
        Ok(mask) => REGION_BITS
            .iter()
            .filter(|(bit, _)| mask & bit == *bit)
            .map(|(_, name)| *name)
            .collect::<Vec<_>>()
            .join(", "),
        Err(_) => String::new(),
    }
}

/// Characters `start..start + len` of an ASCII field, clamped.
pub(crate) fn substr(s: &str, start: usize, len: usize) -> String {
    s.chars().skip(start).take(len).collect()
}

fn classification(data: &[u8]) -> String {
    let kind = field(data, 0x180, 2);
    if kind == b"GM" {
        "Game".to_string()
    } else {
        let text: String = kind.iter().filter(|b| b.is_ascii()).map(|&b| b as char).collect();
        format!("Education ({text})")
    }
}

fn byte_at(data: &[u8], offset: usize) -> u8 {
    data.get(offset).copied().unwrap_or(0)
}

/// BCD version pair at `offset`, e.g. `1.00`.
fn bcd_version(data: &[u8], offset: usize) -> String {
    format!("{:X}.{:02X}", byte_at(data, offset), byte_at(data, offset + 1))
}

fn is_sega_cd(data: &[u8]) -> bool {
    SEGA_CD_IDS.iter().any(|id| matches_at(data, 0, id))
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Decoder for Sega Mega Drive / Genesis cartridges and Sega CD discs.
#[derive(Debug, Default)]
pub struct MegaDriveDecoder;

impl MegaDriveDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FormatDecoder for MegaDriveDecoder {
    fn platform(&self) -> Platform {
        Platform::MegaDrive
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["smd", "gen", "32x", "md", "bin", "iso", "mdx", "68k", "sgd", "cue"]
    }

    fn validate(&self, data: &[u8]) -> bool {
        CONSOLE_NAMES
            .iter()
            .any(|name| matches_at(data, CONSOLE_NAME_OFFSET, name))
    }

    fn prepare<'a>(&self, data: &'a [u8]) -> PreparedBuffer<'a> {
        match interleave::correct(data) {
            Some((scheme, fixed)) => PreparedBuffer::corrected(fixed, scheme.label()),
            None => PreparedBuffer::unchanged(data),
        }
    }

    fn decode(&self, data: &[u8]) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert(PLATFORM_KEY, self.platform().display_name());

        let sega_cd = is_sega_cd(data);
        fields.insert("format", if sega_cd { SEGA_CD_FORMAT } else { "" });

        fields.insert("console", read_ascii_fixed(data, 0x100, 16));
        let copyright = read_ascii_fixed(data, 0x110, 16);
        let publisher = publisher_name(&substr(&copyright, 3, 4));
        fields.insert("copyright", copyright);
        fields.insert("publisher", publisher);
        fields.insert("foreign_title", read_ascii_fixed(data, 0x120, 48));
        fields.insert("title", read_ascii_fixed(data, 0x150, 48));
        fields.insert("classification", classification(data));
        fields.insert("code", read_ascii_fixed(data, 0x183, 8));
        fields.insert("version", read_ascii_fixed(data, 0x18C, 2));

        let checksum = u16::from_be_bytes([byte_at(data, 0x18E), byte_at(data, 0x18F)]);
        fields.insert("checksum", format!("{checksum:04X}"));

        let device_code = read_ascii_fixed(data, 0x190, 16);
        let devices = join_codes(&device_code, device_name);
        fields.insert("device_code", device_code);
        fields.insert("devices", devices);

        if matches_at(data, 0x1BC, b"MO") {
            let modem_code = read_ascii_fixed(data, 0x1BC, 12);
            let modem_publisher = publisher_name(&substr(&modem_code, 2, 4));
            fields.insert("modem", "yes");
            fields.insert("modem_code", modem_code);
            fields.insert("modem_publisher", modem_publisher);
            fields.insert("modem_game_number", read_ascii_fixed(data, 0x1C2, 2));
            fields.insert("modem_version", read_ascii_fixed(data, 0x1C5, 1));
            fields.insert(
                "modem_region",
                modem_support(&read_ascii_fixed(data, 0x1C6, 2)),
            );
        }

        fields.insert("memo", read_ascii_fixed(data, 0x1C8, 40));

        let region_code = read_ascii_fixed(data, 0x1F0, 16);
        let region = decode_region(&region_code);
        fields.insert("region_code", region_code);
        fields.insert("region", region);

        if sega_cd {
            fields.insert("hardware_id", read_ascii_fixed(data, 0x00, 16));
            fields.insert("volume_name", read_ascii_fixed(data, 0x10, 12));
            fields.insert("volume_version", bcd_version(data, 0x1C));
            fields.insert("system_name", read_ascii_fixed(data, 0x20, 12));
            fields.insert("system_version", bcd_version(data, 0x2C));
        }

        fields
    }
}

#[cfg(test)]
#[path = "tests/genesis_tests.rs"]
mod tests;
