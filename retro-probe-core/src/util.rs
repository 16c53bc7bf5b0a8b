/// Read a fixed-length text field from a header.
///
/// Bytes outside printable ASCII become spaces (tab, CR and LF are kept so
/// multi-line memo fields survive), then the result is trimmed. Reading past
/// the end of `buf` simply yields a shorter field.
pub fn read_ascii_fixed(buf: &[u8], offset: usize, len: usize) -> String {
    let field = field(buf, offset, len);
    let s: String = field
        .iter()
        .map(|&b| {
            if matches!(b, b'\t' | b'\n' | b'\r') || (0x20..0x7F).contains(&b) {
                b as char
            } else {
                ' '
            }
        })
        .collect();
    s.trim().to_string()
}

/// Bounds-safe sub-slice: clamps to the end of `buf`.
pub fn field(buf: &[u8], offset: usize, len: usize) -> &[u8] {
    let start = offset.min(buf.len());
    let end = offset.saturating_add(len).min(buf.len());
    &buf[start..end]
}

/// True if `pattern` occurs in `buf` exactly at `offset`.
///
/// A buffer too short to hold the pattern never matches.
pub fn matches_at(buf: &[u8], offset: usize, pattern: &[u8]) -> bool {
    buf.get(offset..offset.saturating_add(pattern.len())) == Some(pattern)
}

/// Lowercased file extension, or an empty string when there is none.
pub fn extension_of(path: &std::path::Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}
