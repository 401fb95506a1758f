use time::OffsetDateTime;

/// Wall-clock Unix seconds. Core auth code takes `now` as a parameter; only
/// the HTTP edge reads the clock.
pub fn unix_now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
