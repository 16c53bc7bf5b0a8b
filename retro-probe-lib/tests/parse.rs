use retro_probe_core::{Platform, ProbeError, ProbeOptions, SectorSize, TrackMode};
use retro_probe_lib::{create_context, create_context_with_options};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SECTORS: usize = 17;

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn put(buf: &mut [u8], offset: usize, text: &[u8]) {
    buf[offset..offset + text.len()].copy_from_slice(text);
}

/// Wrap user data in raw Mode 1 sectors: sync, header, data, zeroed EDC/ECC.
fn raw_mode1(user: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in user.chunks(2048) {
        let mut sector = vec![0u8; 2352];
        sector[1..11].fill(0xFF);
        sector[15] = 0x01;
        sector[16..16 + chunk.len()].copy_from_slice(chunk);
        out.extend(sector);
    }
    out
}

fn saturn_user_data() -> Vec<u8> {
    let mut user = vec![0u8; SECTORS * 2048];
    put(&mut user, 0x00, b"SEGA SEGASATURN ");
    put(&mut user, 0x10, b"SEGA ENTERPRISES");
    put(&mut user, 0x20, b"MK-81088  ");
    put(&mut user, 0x60, b"SEGA RALLY CHAMPIONSHIP");
    user
}

fn dreamcast_user_data() -> Vec<u8> {
    let mut user = vec![0x20u8; SECTORS * 2048];
    put(&mut user, 0x00, b"SEGA SEGAKATANA ");
    put(&mut user, 0x80, b"CRAZY TAXI");
    user
}

fn cartridge() -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    put(&mut rom, 0x100, b"SEGA MEGA DRIVE ");
    put(&mut rom, 0x110, b"(C)SEGA 1991.JUN");
    put(&mut rom, 0x150, b"SONIC THE HEDGEHOG");
    put(&mut rom, 0x1F0, b"JUE");
    rom
}

fn iso_user_data() -> Vec<u8> {
    let mut user = vec![0u8; SECTORS * 2048];
    user[0x8000] = 0x01;
    put(&mut user, 0x8001, b"CD001");
    put(&mut user, 0x8028, b"DATA_DISC");
    user
}

#[test]
fn saturn_cue_sheet() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "Rally (Track 1).bin", &raw_mode1(&saturn_user_data()));
    let cue = write(
        tmp.path(),
        "Rally.cue",
        b"FILE \"Rally (Track 1).bin\" BINARY\n  TRACK 01 MODE1/2352\n    INDEX 01 00:00:00\n",
    );

    let fields = create_context().parse(&cue).unwrap();
    assert_eq!(fields.get_str("platform"), Some("Saturn"));
    assert_eq!(fields.get_str("product_id"), Some("MK-81088"));
    assert_eq!(fields.get_str("title"), Some("SEGA RALLY CHAMPIONSHIP"));

    let tracks = fields.tracks().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks.first().mode, TrackMode::Mode1);
    assert_eq!(tracks.first().sector_size, SectorSize::Raw2352);
    assert_eq!(fields.keys().last(), Some("tracks"));
}

#[test]
fn dreamcast_gdi_reads_high_density_track() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "track01.bin", &raw_mode1(&saturn_user_data()));
    write(tmp.path(), "track02.raw", &vec![0u8; 2352 * 4]);
    write(tmp.path(), "track03.bin", &raw_mode1(&dreamcast_user_data()));
    let gdi = write(
        tmp.path(),
        "disc.gdi",
        b"3\n1 0 4 2352 track01.bin 0\n2 600 0 2352 track02.raw 0\n3 45000 4 2352 track03.bin 0\n",
    );

    let fields = create_context().parse(&gdi).unwrap();
    assert_eq!(fields.get_str("platform"), Some("Dreamcast"));
    assert_eq!(fields.get_str("title"), Some("CRAZY TAXI"));
    assert_eq!(fields.tracks().unwrap().len(), 3);
}

#[test]
fn cartridge_without_layout() {
    let tmp = TempDir::new().unwrap();
    let rom = write(tmp.path(), "sonic.md", &cartridge());

    let fields = create_context().parse(&rom).unwrap();
    assert_eq!(fields.get_str("platform"), Some("Mega Drive"));
    assert_eq!(fields.get_str("title"), Some("SONIC THE HEDGEHOG"));
    assert_eq!(fields.get_str("publisher"), Some("SEGA"));
    assert_eq!(fields.get_str("region"), Some("Asia, America, Europe"));
    assert!(fields.tracks().is_none());
}

#[test]
fn cartridge_with_disc_extension() {
    // .bin is sniffed first; with no volume descriptor it is read flat
    let tmp = TempDir::new().unwrap();
    let rom = write(tmp.path(), "sonic.bin", &cartridge());

    let fields = create_context().parse(&rom).unwrap();
    assert_eq!(fields.get_str("platform"), Some("Mega Drive"));
    assert!(fields.tracks().is_none());
}

#[test]
fn smd_dump_is_deinterleaved() {
    let rom = cartridge();
    let mut smd = vec![0u8; 0x200];
    smd[0] = 2;
    smd[1] = 3;
    smd[8..11].copy_from_slice(&[0xAA, 0xBB, 0x06]);
    for block in rom.chunks(0x4000) {
        smd.extend(block.iter().skip(1).step_by(2));
        smd.extend(block.iter().step_by(2));
    }

    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "sonic.smd", &smd);
    let fields = create_context().parse(&path).unwrap();
    assert_eq!(fields.get_str("platform"), Some("Mega Drive"));
    assert_eq!(fields.get_str("format"), Some("Super Magic Drive interleaved"));
    assert_eq!(fields.get_str("title"), Some("SONIC THE HEDGEHOG"));
}

#[test]
fn plain_iso_falls_through_to_generic_disc() {
    let tmp = TempDir::new().unwrap();
    let iso = write(tmp.path(), "data.iso", &iso_user_data());

    let fields = create_context().parse(&iso).unwrap();
    assert_eq!(fields.get_str("platform"), Some("Generic Disc"));
    assert_eq!(fields.get_str("standard_id"), Some("CD001"));
    assert_eq!(fields.get_str("volume_id"), Some("DATA_DISC"));
    let tracks = fields.tracks().unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks.first().index, 0);
    assert_eq!(tracks.first().sector_size, SectorSize::Cooked2048);
}

#[test]
fn short_sector_read_misses_descriptor() {
    let tmp = TempDir::new().unwrap();
    let iso = write(tmp.path(), "data.iso", &iso_user_data());

    let ctx = create_context_with_options(ProbeOptions::new().sector_read_count(4));
    assert!(ctx.parse(&iso).unwrap().is_empty());
}

#[test]
fn missing_track_file_is_not_recognized() {
    let tmp = TempDir::new().unwrap();
    let cue = write(
        tmp.path(),
        "lost.cue",
        b"FILE \"lost.bin\" BINARY\n  TRACK 01 MODE1/2352\n    INDEX 01 00:00:00\n",
    );

    let fields = create_context().parse(&cue).unwrap();
    assert!(fields.is_empty());
}

#[test]
fn unhandled_extension_is_empty() {
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "notes.txt", &cartridge());
    assert!(create_context().parse(&path).unwrap().is_empty());
}

#[test]
fn unrelated_file_is_empty() {
    let tmp = TempDir::new().unwrap();
    let path = write(tmp.path(), "noise.md", &[0x5Au8; 1000]);
    let fields = create_context().parse(&path).unwrap();
    assert!(fields.is_empty());
    assert!(fields.tracks().is_none());
}

#[test]
fn missing_path_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("gone.iso");
    assert!(matches!(
        create_context().parse(&missing),
        Err(ProbeError::NotFound(_))
    ));
}

#[test]
fn buffer_parse_has_no_tracks() {
    let ctx = create_context();
    assert!(ctx.parse_buffer(&[]).is_empty());

    let fields = ctx.parse_buffer(&saturn_user_data());
    assert_eq!(fields.get_str("platform"), Some("Saturn"));
    assert!(fields.tracks().is_none());
}

#[test]
fn json_output_shape() {
    let tmp = TempDir::new().unwrap();
    let iso = write(tmp.path(), "data.iso", &iso_user_data());
    let fields = create_context().parse(&iso).unwrap();

    let json = serde_json::to_value(&fields).unwrap();
    let track = &json["tracks"][0];
    assert_eq!(track["index"], 0);
    assert_eq!(track["offset"], 0);
    assert_eq!(track["sector_size"], 2048);
    assert_eq!(track["mode"], 1);
    assert_eq!(track["filename"], iso.to_string_lossy().as_ref());
}

#[test]
fn default_decoders_follow_platform_order() {
    let ctx = create_context();
    let platforms: Vec<Platform> = ctx.decoders().map(|d| d.metadata.platform).collect();
    assert_eq!(platforms, Platform::all());
    assert_eq!(platforms.last(), Some(&Platform::GenericDisc));
}
