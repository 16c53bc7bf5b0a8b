//! Mega Drive copier interleave detection and correction.
//!
//! Two copier formats store the ROM with its odd bytes ahead of its even
//! bytes:
//!
//! - Super Magic Drive (`.smd`): a 512-byte header, then 16 KiB blocks, each
//!   holding 8 KiB of odd bytes followed by 8 KiB of even bytes.
//! - Multi Game Doctor (`.md`): no header, the whole file is split in two
//!   halves, odd bytes first.
//!
//! Both are undone by the same pairwise merge, applied per block or once over
//! the whole buffer.

use retro_probe_core::util::matches_at;

/// Size of the Super Magic Drive file header.
pub const SMD_HEADER_SIZE: usize = 0x200;

/// Size of one Super Magic Drive interleave block.
pub const SMD_BLOCK_SIZE: usize = 0x4000;

/// Header marker at 0x08..0x0B of a Super Magic Drive file.
const SMD_MARKER: &[u8] = &[0xAA, 0xBB, 0x06];

/// Known dumps whose interleaving the signature checks miss, keyed by the
/// offset and bytes that identify them in the interleaved data.
pub const FINGERPRINTS: &[(usize, &[u8])] = &[
    (0x00f0, b"OL R-AEAL"),        // Japanese baseball 94
    (0x00f3, b"optrEtranet"),      // Devilish Mahjong Tower
    (0x0100, b"\x3C\x00\x00\x3C"), // Golden Axe 2 beta
    (0x0090, b"OEARC   "),         // Omega Race
    (0x6708, b" NTEBDKN"),         // Budokan beta
    (0x02c0, b"so fCXP"),          // CDX-Pro 1.8 BIOS
    (0x0090, b"sio-Wyo "),         // Ishido (hack)
    (0x0088, b"SS  CAL "),         // Onslaught
    (0x3648, b"SG NEPIE"),         // Tram Terror pirate
    (0x0007, b"\x1C\x0A\xB8\x0A"), // Breath of Fire 3 Chinese
    (0x1cbe, b"@TTI>"),            // Tetris pirate
];

/// A copier interleave scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interleave {
    /// Super Magic Drive: 512-byte header plus 16 KiB interleaved blocks
    SuperMagicDrive,
    /// Multi Game Doctor: one interleave over the whole file, no header
    MultiGameDoctor,
}

impl Interleave {
    /// Name recorded in the `format` field once the interleave is undone.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SuperMagicDrive => "Super Magic Drive interleaved",
            Self::MultiGameDoctor => "Multi Game Doctor interleaved",
        }
    }
}

/// True if `data` looks like headerless interleaved ROM data.
///
/// The first two checks look at the first character of the odd and even
/// halves of the console name; the next looks for the odd half of
/// `SEGA MEGA DRIVE` / `SEGA GENESIS`; the rest are [`FINGERPRINTS`].
pub fn is_interleaved(data: &[u8]) -> bool {
    let odd = data.get(0x80).copied();
    let even = data.get(0x2080).copied();
    if odd == Some(b'E') && even == Some(b'S') {
        return true;
    }
    // Phelios (USA), Target Earth, Klax (Namcot)
    if odd == Some(b'S') && even == Some(b' ') {
        return true;
    }
    if matches_at(data, 0x80, b"EAMG") || matches_at(data, 0x80, b"EAGN") {
        return true;
    }
    FINGERPRINTS
        .iter()
        .any(|(offset, pattern)| matches_at(data, *offset, pattern))
}

/// True if `data` starts with a Super Magic Drive header.
///
/// Falls back to a size heuristic when the header marker is missing: no
/// `SEGA` at 0x100, a whole number of 512-byte units, and an odd count of
/// them (the header adds one unit to an otherwise even size). Finally the
/// data after the header is tested with [`is_interleaved`].
pub fn has_smd_header(data: &[u8]) -> bool {
    if data.len() < SMD_HEADER_SIZE {
        return false;
    }
    if matches_at(data, 0x08, SMD_MARKER) {
        return true;
    }
    if !matches_at(data, 0x100, b"SEGA")
        && data.len() % 512 == 0
        && (data.len() >> 9) % 2 == 1
    {
        return true;
    }
    is_interleaved(&data[SMD_HEADER_SIZE..])
}

/// Which interleave, if any, `data` carries. Super Magic Drive wins when
/// both match.
pub fn detect(data: &[u8]) -> Option<Interleave> {
    if has_smd_header(data) {
        Some(Interleave::SuperMagicDrive)
    } else if is_interleaved(data) {
        Some(Interleave::MultiGameDoctor)
    } else {
        None
    }
}

/// Merge a block whose first half holds the odd bytes and second half the
/// even bytes back into natural order. For an odd length the even half is
/// the longer one.
fn merge_halves(block: &[u8], out: &mut [u8]) {
    let (odd, even) = block.split_at(block.len() / 2);
    for (i, &b) in even.iter().enumerate() {
        out[2 * i] = b;
    }
    for (i, &b) in odd.iter().enumerate() {
        out[2 * i + 1] = b;
    }
}

/// Strip the 512-byte header and deinterleave each whole 16 KiB block.
///
/// A trailing partial block is copied through unchanged.
pub fn deinterleave_smd(data: &[u8]) -> Vec<u8> {
    let payload = data.get(SMD_HEADER_SIZE..).unwrap_or_default();
    let mut out = payload.to_vec();
    for (src, dst) in payload
        .chunks_exact(SMD_BLOCK_SIZE)
        .zip(out.chunks_exact_mut(SMD_BLOCK_SIZE))
    {
        merge_halves(src, dst);
    }
    out
}

/// Deinterleave a whole headerless buffer.
pub fn deinterleave_md(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; data.len()];
    merge_halves(data, &mut out);
    out
}

/// Detect and undo copier interleaving.
///
/// Returns the scheme found and the corrected data, or `None` when `data`
/// shows no sign of interleaving and should be used as-is.
pub fn correct(data: &[u8]) -> Option<(Interleave, Vec<u8>)> {
    let scheme = detect(data)?;
    let fixed = match scheme {
        Interleave::SuperMagicDrive => deinterleave_smd(data),
        Interleave::MultiGameDoctor => deinterleave_md(data),
    };
    log::debug!("Undid {} ({} bytes)", scheme.label(), fixed.len());
    Some((scheme, fixed))
}

#[cfg(test)]
#[path = "tests/interleave_tests.rs"]
mod tests;
