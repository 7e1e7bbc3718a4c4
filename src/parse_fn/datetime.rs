use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Earliest year accepted as a real capture date.
pub const MIN_YEAR: i32 = 1970;
/// Latest year accepted as a real capture date.
pub const MAX_YEAR: i32 = 2099;

/// Placeholder timestamps (`0000:00:00 00:00:00`, `1904:01:01 ...`) fall outside this range.
pub fn in_supported_range(datetime: &DateTime<Utc>) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&datetime.year())
}

/// Parses an EXIF timestamp (`2006:11:12 17:08:24`) as UTC.
pub fn exif_datetime(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y:%m:%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y:%m:%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
        .filter(in_supported_range)
}

/// Parses the ISO 8601 style dates `identify` reports for `date:modify` and
/// `date:create`, e.g. `2016-03-01T10:20:30+01:00`.
///
/// Timestamps without an offset are taken as UTC, bare dates as midnight UTC.
pub fn iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    guess_iso_datetime(value).filter(in_supported_range)
}

fn guess_iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
        return Some(zoned.with_timezone(&Utc));
    }
    // Offset without a colon (+0100), or a space instead of the `T`
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(zoned) = DateTime::parse_from_str(value, format) {
            return Some(zoned.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
