/*! A simple continuous time model.

All simulation-internal arithmetic works on real-valued offsets in
seconds relative to an absolute anchor. Calendar time enters and leaves
the crate only through the conversion helpers at the bottom of this
module; no wall-clock object is carried inside the core.
*/

use chrono::{DateTime, TimeZone, Utc};

/// This crate uses a simple continuous time model: seconds as `f64`.
pub type Time = f64;

/// Syntactic sugar to give a hint that a time value indicates a
/// point in time, expressed in seconds since the Unix epoch or as an
/// offset from a window anchor.
pub type Instant = Time;

/// Syntactic sugar to give a hint that a time value denotes an
/// interval length.
pub type Duration = Time;

pub const SECOND: Duration = 1.0;
pub const MINUTE: Duration = 60.0 * SECOND;
pub const HOUR: Duration = 60.0 * MINUTE;
pub const DAY: Duration = 24.0 * HOUR;
pub const WEEK: Duration = 7.0 * DAY;

/// Express a calendar timestamp as seconds since the Unix epoch.
pub fn epoch_seconds<Tz: TimeZone>(dt: &DateTime<Tz>) -> Instant {
    dt.timestamp_micros() as f64 / 1e6
}

/// Map an epoch offset back into calendar time in the given timezone.
///
/// Panics if `t` falls outside the range representable by [chrono],
/// which cannot happen for the non-negative, bounded horizons accepted
/// by the simulation entry points.
pub fn datetime_at<Tz: TimeZone>(t: Instant, tz: &Tz) -> DateTime<Tz> {
    let micros = (t * 1e6).round() as i64;
    match DateTime::<Utc>::from_timestamp_micros(micros) {
        Some(utc) => utc.with_timezone(tz),
        None => panic!("timestamp {} outside the representable calendar range", t),
    }
}
