use std::borrow::Cow;

use retro_probe_core::{FieldValue, PreparedBuffer};

use super::*;

/// Accepts buffers starting with `magic` and reports which decoder ran.
struct MagicDecoder {
    platform: Platform,
    magic: &'static [u8],
    name: &'static str,
}

impl FormatDecoder for MagicDecoder {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["bin"]
    }

    fn validate(&self, data: &[u8]) -> bool {
        data.starts_with(self.magic)
    }

    fn decode(&self, _data: &[u8]) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("platform", self.name);
        fields.insert("format", "");
        fields
    }
}

/// Reverses buffers that start with `ROX` and marks them corrected.
struct ReversingDecoder;

impl FormatDecoder for ReversingDecoder {
    fn platform(&self) -> Platform {
        Platform::MegaDrive
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md"]
    }

    fn validate(&self, _data: &[u8]) -> bool {
        false
    }

    fn prepare<'a>(&self, data: &'a [u8]) -> PreparedBuffer<'a> {
        if data.starts_with(b"ROX") {
            let mut fixed = data.to_vec();
            fixed.reverse();
            PreparedBuffer::corrected(fixed, "reversed")
        } else {
            PreparedBuffer::unchanged(data)
        }
    }

    fn decode(&self, data: &[u8]) -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("platform", "Reversed");
        fields.insert("format", "");
        fields.insert("last", String::from_utf8_lossy(&data[data.len() - 3..]).into_owned());
        fields
    }
}

fn magic(platform: Platform, magic: &'static [u8], name: &'static str) -> MagicDecoder {
    MagicDecoder {
        platform,
        magic,
        name,
    }
}

#[test]
fn registration_order_is_kept() {
    let mut ctx = ProbeContext::new();
    ctx.register(magic(Platform::Saturn, b"AB", "first"))
        .register(magic(Platform::Dreamcast, b"A", "second"));

    let names: Vec<&str> = ctx.decoders().map(|d| d.metadata.short_name).collect();
    assert_eq!(names, ["saturn", "dreamcast"]);
}

#[test]
fn first_match_wins() {
    let mut ctx = ProbeContext::new();
    ctx.register(magic(Platform::Saturn, b"AB", "first"))
        .register(magic(Platform::Dreamcast, b"A", "second"));

    assert_eq!(ctx.parse_buffer(b"ABC").get_str("platform"), Some("first"));
    assert_eq!(ctx.parse_buffer(b"AXC").get_str("platform"), Some("second"));
}

#[test]
fn retain_platforms_drops_other_decoders() {
    let mut ctx = ProbeContext::new();
    ctx.register(magic(Platform::Saturn, b"AB", "first"))
        .register(magic(Platform::Dreamcast, b"A", "second"));
    ctx.retain_platforms(&[Platform::Dreamcast]);

    assert_eq!(ctx.decoders().count(), 1);
    assert_eq!(ctx.parse_buffer(b"ABC").get_str("platform"), Some("second"));
}

#[test]
fn unrecognized_buffer_is_empty() {
    let mut ctx = ProbeContext::new();
    ctx.register(magic(Platform::Saturn, b"AB", "first"));

    let inputs: [&[u8]; 3] = [b"", b"zzz", &[0u8; 4096]];
    for data in inputs {
        let fields = ctx.parse_buffer(data);
        assert!(fields.is_empty());
        assert!(!fields.contains_key(TRACKS_KEY));
    }
}

#[test]
fn empty_context_recognizes_nothing() {
    assert!(ProbeContext::new().parse_buffer(b"anything").is_empty());
}

#[test]
fn correction_skips_validation_and_sets_format() {
    let mut ctx = ProbeContext::new();
    ctx.register(ReversingDecoder);

    let fields = ctx.parse_buffer(b"ROXabc");
    assert_eq!(fields.get_str("platform"), Some("Reversed"));
    assert_eq!(fields.get_str("format"), Some("reversed"));
    assert_eq!(fields.keys().nth(1), Some("format"));
    assert_eq!(
        fields.get("last"),
        Some(&FieldValue::Text("XOR".to_string()))
    );

    assert!(ctx.parse_buffer(b"abcROX").is_empty());
}

#[test]
fn decoder_info_from_decoder() {
    let info = DecoderInfo::from_decoder(&ReversingDecoder);
    assert_eq!(info.platform, Platform::MegaDrive);
    assert_eq!(info.short_name, "megadrive");
    assert_eq!(info.platform_name, "Mega Drive");
    assert_eq!(info.extensions, &["md"]);
}

#[test]
fn options_are_kept() {
    let ctx = ProbeContext::with_options(ProbeOptions::new().sector_read_count(20));
    assert_eq!(ctx.options().sector_read_count, 20);
    assert_eq!(
        ctx.options().max_cartridge_bytes,
        retro_probe_core::DEFAULT_MAX_CARTRIDGE_BYTES
    );
}

#[test]
fn prepared_buffer_borrowing() {
    let data = [1u8, 2, 3];
    let prepared = PreparedBuffer::unchanged(&data);
    assert!(matches!(prepared.data, Cow::Borrowed(_)));
    assert!(!prepared.is_corrected());
}
