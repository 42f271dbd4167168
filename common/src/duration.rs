use std::fmt;
use std::fmt::Formatter;

use chrono::Duration;

const NAMES: [&str; 8] = ["w", "d", "h", "m", "s", "ms", "u", "ns"];
const SIZES_NS: [i64; 8] = [
    604_800_000_000_000,
    86_400_000_000_000,
    3_600_000_000_000,
    60_000_000_000,
    1_000_000_000,
    1_000_000,
    1_000,
    1,
];

/// Writes a nanosecond duration using the largest unit that divides it evenly,
/// e.g. `5m`, `90s`, `1500ms`. Zero is written as `0s`.
pub fn fmt_duration_ns(f: &mut Formatter<'_>, v: i64) -> fmt::Result {
    if v == 0 {
        return write!(f, "0s");
    }
    for (size, name) in SIZES_NS.iter().zip(NAMES.iter()) {
        if v % size == 0 {
            return write!(f, "{}{}", v / size, name);
        }
    }
    write!(f, "{}ns", v)
}

/// Formats a chrono duration the same way as [`fmt_duration_ns`]. Durations too large
/// to be expressed in nanoseconds fall back to whole seconds.
pub fn format_duration(d: &Duration) -> String {
    struct Wrapper(Duration);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            match self.0.num_nanoseconds() {
                Some(ns) => fmt_duration_ns(f, ns),
                None => write!(f, "{}s", self.0.num_seconds()),
            }
        }
    }

    Wrapper(*d).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use test_case::test_case;

    use super::format_duration;

    #[test_case(Duration::zero(), "0s")]
    #[test_case(Duration::minutes(5), "5m")]
    #[test_case(Duration::seconds(90), "90s")]
    #[test_case(Duration::hours(1), "1h")]
    #[test_case(Duration::days(14), "2w")]
    #[test_case(Duration::milliseconds(1500), "1500ms")]
    #[test_case(Duration::microseconds(3), "3u")]
    #[test_case(Duration::nanoseconds(7), "7ns")]
    #[test_case(Duration::minutes(-2), "-2m")]
    fn test_format_duration(d: Duration, expected: &str) {
        assert_eq!(format_duration(&d), expected);
    }
}
