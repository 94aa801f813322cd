//! Global configuration for runtime behavior.
//!
//! Values are meant to be set once at startup, before any file is opened,
//! and are read when a new file is sniffed.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of data lines the format sniffer inspects.
pub const DEFAULT_SNIFF_LOOKAHEAD: usize = 1000;

static SNIFF_LOOKAHEAD: AtomicUsize = AtomicUsize::new(DEFAULT_SNIFF_LOOKAHEAD);

/// Set how many data lines the format sniffer may inspect before giving up.
///
/// Header, comment and blank lines do not count. Values below 1 are clamped to 1.
///
/// # Example
///
/// ```
/// use grit_intervals::config;
///
/// config::set_sniff_lookahead(10);
/// assert_eq!(config::sniff_lookahead(), 10);
/// config::set_sniff_lookahead(config::DEFAULT_SNIFF_LOOKAHEAD);
/// ```
#[inline]
pub fn set_sniff_lookahead(lines: usize) {
    SNIFF_LOOKAHEAD.store(lines.max(1), Ordering::Release);
}

/// Current sniffer lookahead, in data lines.
#[inline]
pub fn sniff_lookahead() -> usize {
    SNIFF_LOOKAHEAD.load(Ordering::Acquire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_lookahead() {
        set_sniff_lookahead(DEFAULT_SNIFF_LOOKAHEAD);
        assert_eq!(sniff_lookahead(), 1000);
    }

    #[test]
    #[serial]
    fn test_lookahead_clamps_to_one() {
        set_sniff_lookahead(0);
        assert_eq!(sniff_lookahead(), 1);
        set_sniff_lookahead(DEFAULT_SNIFF_LOOKAHEAD);
    }
}
