use chrono::{DateTime, Duration, Utc};

/// Nanoseconds from the zero time, 0001-01-01T00:00:00Z, to the unix epoch.
const ZERO_TIME_TO_EPOCH_NANOS: i128 = 719_162 * 86_400 * 1_000_000_000;

/// Returns the duration in nanoseconds, or `None` if it does not fit in an `i64`.
#[inline]
pub fn duration_nanos(d: &Duration) -> Option<i64> {
    d.num_nanoseconds()
}

/// Returns the nanosecond unix timestamp of `t`, or `None` outside of the representable
/// range (roughly the years 1677 to 2262).
#[inline]
pub fn datetime_nanos(t: &DateTime<Utc>) -> Option<i64> {
    t.timestamp_nanos_opt()
}

/// Returns the unix nanosecond timestamp `ts` minus its truncation to a multiple of
/// `interval`, where multiples are counted from the zero time 0001-01-01T00:00:00Z.
/// The result is always in `[0, interval)`. `interval` must be positive.
#[inline]
pub fn offset_within(ts: i64, interval: i64) -> i64 {
    debug_assert!(interval > 0);
    let since_zero = i128::from(ts) + ZERO_TIME_TO_EPOCH_NANOS;
    // the remainder is below `interval`, so it fits
    since_zero.rem_euclid(i128::from(interval)) as i64
}

/// Same as [`offset_within`] for a point in time and a bucket duration.
pub fn time_offset(t: &DateTime<Utc>, interval: &Duration) -> Option<Duration> {
    let ts = datetime_nanos(t)?;
    let interval = duration_nanos(interval)?;
    if interval <= 0 {
        return None;
    }
    Some(Duration::nanoseconds(offset_within(ts, interval)))
}
