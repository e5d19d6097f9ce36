use regex::Regex;
use std::sync::LazyLock;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:([0-9]+)H)?(?:([0-9]+)M)?(?:([0-9]+)S)?").expect("pattern is valid")
});

/// Converts a video length like `PT1H2M10S` into seconds.
///
/// Only the time part is understood, and the pattern is anchored at the start of the string
/// but not at the end. Missing components count as zero, and anything that does not start with
/// `PT` (including day-based durations like `P1D`) is zero.
pub fn parse_duration(duration: &str) -> u64 {
    let Some(captures) = ISO_DURATION.captures(duration) else {
        return 0;
    };
    // the captures are all digits, so a failed parse can only mean overflow
    let component = |i: usize| {
        captures
            .get(i)
            .map_or(0, |m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
    };
    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}
