//! Low-level line parsing helpers shared by the sniffer and the record parser.

use memchr::memchr_iter;

/// Fast u64 parsing - no allocation, no error formatting.
///
/// Returns None if the input is empty, contains non-digit characters, or overflows.
#[inline(always)]
pub fn parse_u64_fast(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        n = n.checked_mul(10)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Check if a line should be skipped (blank, comment, or header).
#[inline(always)]
pub fn should_skip_line(line: &[u8]) -> bool {
    line.trim_ascii().is_empty()
        || line[0] == b'#'
        || line.starts_with(b"track")
        || line.starts_with(b"browser")
}

/// Strip a trailing `\n` or `\r\n`.
#[inline]
pub fn trim_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Split a line on tabs using memchr.
///
/// Every tab yields a boundary, so empty columns are preserved and joining
/// the result with `\t` reproduces the input exactly.
pub fn split_tabs(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut fields = Vec::with_capacity(12);
    let mut begin = 0;
    for tab in memchr_iter(b'\t', bytes) {
        // Tabs are ASCII, so both offsets sit on char boundaries.
        fields.push(&line[begin..tab]);
        begin = tab + 1;
    }
    fields.push(&line[begin..]);
    fields
}
