use crate::attributes::{tags, RawAttributes};
use crate::structs::exif_info::ExifInfo;
use chrono::{DateTime, Utc};

/// Apple writes `CustomRendered = 3` for HDR captures.
const APPLE_HDR_RENDERED: i64 = 3;
/// Apple writes `CustomRendered = 4` for the regular capture of an HDR pair.
const APPLE_NORMAL_RENDERED: i64 = 4;

/// Parses the `name=value` lines printed by `identify` into an [`ExifInfo`].
///
/// This never fails. Lines without `=`, unknown tags and values that do not
/// parse are skipped, leaving the corresponding fields `None`.
///
/// ```
/// use magick_exif::parse_exif;
///
/// let exif = parse_exif("exif:Make=Canon\nexif:FNumber=28/10\nnot a tag line\n");
/// assert_eq!(exif.make.as_deref(), Some("Canon"));
/// assert_eq!(exif.f_number, Some(2.8));
/// assert_eq!(exif.width, None);
/// ```
pub fn parse_exif(raw: &str) -> ExifInfo {
    ExifInfo::from(&RawAttributes::from_text(raw))
}

impl From<&RawAttributes> for ExifInfo {
    fn from(attributes: &RawAttributes) -> Self {
        let (latitude, longitude) = coordinates(attributes).unzip();

        ExifInfo {
            make: attributes.text(tags::MAKE).map(str::to_owned),
            model: attributes.text(tags::MODEL).map(str::to_owned),
            width: dimension(attributes, tags::WIDTH),
            height: dimension(attributes, tags::HEIGHT),
            resolution: resolution(attributes),
            orientation: attributes
                .integer(tags::ORIENTATION)
                .and_then(|code| u8::try_from(code).ok()),
            date_time: date_time(attributes),
            focal_length: attributes.float(tags::FOCAL_LENGTH),
            exposure_time: attributes.float(tags::EXPOSURE_TIME),
            f_number: attributes.float(tags::F_NUMBER),
            hdr: hdr(attributes),
            latitude,
            longitude,
            altitude: altitude(attributes),
        }
    }
}

fn dimension(attributes: &RawAttributes, tag: &str) -> Option<u32> {
    attributes
        .integer(tag)
        .and_then(|value| u32::try_from(value).ok())
}

fn resolution(attributes: &RawAttributes) -> Option<String> {
    let x = attributes
        .float(tags::EXIF_X_RESOLUTION)
        .or_else(|| attributes.float(tags::X_RESOLUTION))?;
    let y = attributes
        .float(tags::EXIF_Y_RESOLUTION)
        .or_else(|| attributes.float(tags::Y_RESOLUTION))?;
    Some(format!("{}x{}", x, y))
}

fn date_time(attributes: &RawAttributes) -> Option<DateTime<Utc>> {
    [
        tags::DATE_TIME_DIGITIZED,
        tags::DATE_TIME_ORIGINAL,
        tags::DATE_MODIFY,
        tags::DATE_CREATE,
    ]
    .into_iter()
    .find_map(|tag| attributes.datetime(tag))
}

fn hdr(attributes: &RawAttributes) -> Option<bool> {
    let make = attributes.text(tags::MAKE)?;
    if !make.eq_ignore_ascii_case("apple") {
        return None;
    }
    match attributes.integer(tags::CUSTOM_RENDERED)? {
        APPLE_HDR_RENDERED => Some(true),
        APPLE_NORMAL_RENDERED => Some(false),
        _ => None,
    }
}

fn to_degrees([degrees, minutes, seconds]: [f64; 3]) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

fn coordinates(attributes: &RawAttributes) -> Option<(f64, f64)> {
    let latitude = attributes.triplet(tags::GPS_LATITUDE)?;
    let latitude_ref = attributes.char(tags::GPS_LATITUDE_REF)?;
    let longitude = attributes.triplet(tags::GPS_LONGITUDE)?;
    let longitude_ref = attributes.char(tags::GPS_LONGITUDE_REF)?;

    let mut latitude = to_degrees(latitude);
    let mut longitude = to_degrees(longitude);
    if latitude_ref == 'S' {
        latitude = -latitude;
    }
    if longitude_ref == 'W' {
        longitude = -longitude;
    }
    Some((latitude, longitude))
}

fn altitude(attributes: &RawAttributes) -> Option<f64> {
    let altitude = attributes.float(tags::GPS_ALTITUDE)?;
    match attributes.integer(tags::GPS_ALTITUDE_REF)? {
        // Below sea level
        1 => Some(-altitude),
        _ => Some(altitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const CANON_G5: &str = "\
exif:make=Canon
exif:model=Canon PowerShot G5
width=1600
height=1200
xResolution=180
yResolution=180
exif:orientation=1
exif:datetimedigitized=2006:11:12 17:08:24
exif:focallength=129/18
exif:exposuretime=1/60
exif:fnumber=2/1
";

    #[test]
    fn test_canon_powershot_g5() {
        let exif = parse_exif(CANON_G5);

        assert_eq!(
            exif,
            ExifInfo {
                make: Some("Canon".to_string()),
                model: Some("Canon PowerShot G5".to_string()),
                width: Some(1600),
                height: Some(1200),
                resolution: Some("180x180".to_string()),
                orientation: Some(1),
                date_time: Utc.with_ymd_and_hms(2006, 11, 12, 17, 8, 24).single(),
                focal_length: Some(7.167),
                exposure_time: Some(0.017),
                f_number: Some(2.0),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_identify_style_output() {
        // Shape of real `identify -format` output: mixed case names, units, blank lines
        let raw = "exif:ExifVersion=48, 50, 50, 48\n\
                   exif:FocalLength=4.7 mm\n\
                   exif:Make=HUAWEI\n\
                   exif:Orientation=6\n\
                   exif:XResolution=72/1\n\
                   exif:YResolution=72/1\n\
                   \n\
                   date:create=2021-05-03T08:00:00+00:00\n\
                   date:modify=2021-05-03T09:30:00+02:00\n\
                   width=4032\n\
                   height=3024\n\
                   xResolution=72 PixelsPerInch\n\
                   yResolution=72 PixelsPerInch\n";

        let exif = parse_exif(raw);
        assert_eq!(exif.make.as_deref(), Some("HUAWEI"));
        assert_eq!(exif.focal_length, Some(4.7));
        assert_eq!(exif.orientation, Some(6));
        assert_eq!(exif.resolution.as_deref(), Some("72x72"));
        assert_eq!((exif.width, exif.height), (Some(4032), Some(3024)));
        assert_eq!(
            exif.date_time,
            Utc.with_ymd_and_hms(2021, 5, 3, 7, 30, 0).single()
        );
    }

    #[test]
    fn test_garbage_input_yields_empty_record() {
        assert_eq!(parse_exif(""), ExifInfo::default());
        assert_eq!(parse_exif("\n\n\n"), ExifInfo::default());
        assert_eq!(parse_exif("=\n==\n=x=\n"), ExifInfo::default());

        let noise: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let noise = String::from_utf8_lossy(&noise);
        let exif = parse_exif(&noise);
        assert_eq!(exif.latitude, None);
        assert_eq!(exif.date_time, None);
    }

    #[test]
    fn test_garbage_values_leave_fields_absent() {
        let raw = "exif:orientation=sideways\n\
                   width=-20\n\
                   height=tall\n\
                   exif:fnumber=0/0\n\
                   exif:exposuretime=1/0\n\
                   exif:datetimeoriginal=0000:00:00 00:00:00\n\
                   exif:gpslatitude=1/1, 2/1\n";
        assert_eq!(parse_exif(raw), ExifInfo::default());
    }

    #[test]
    fn test_date_time_priority() {
        let raw = "date:create=2001-01-01T00:00:00Z\n\
                   date:modify=2002-01-01T00:00:00Z\n\
                   exif:datetimeoriginal=2003:01:01 00:00:00\n\
                   exif:datetimedigitized=2004:01:01 00:00:00\n";
        let year = |raw: &str| parse_exif(raw).date_time.map(|d| d.format("%Y").to_string());

        assert_eq!(year(raw).as_deref(), Some("2004"));

        let without_digitized: String = raw.lines().take(3).map(|l| format!("{l}\n")).collect();
        assert_eq!(year(&without_digitized).as_deref(), Some("2003"));

        let file_dates: String = raw.lines().take(2).map(|l| format!("{l}\n")).collect();
        assert_eq!(year(&file_dates).as_deref(), Some("2002"));

        assert_eq!(year("date:create=2001-01-01T00:00:00Z").as_deref(), Some("2001"));
    }

    #[test]
    fn test_invalid_digitized_date_falls_back_to_original() {
        let raw = "exif:datetimedigitized=1969:12:31 23:59:59\n\
                   exif:datetimeoriginal=1970:01:01 00:00:00\n";
        assert_eq!(
            parse_exif(raw).date_time,
            Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).single()
        );
    }

    #[test]
    fn test_gps_coordinates() {
        let raw = "exif:gpslatitude=10/1, 30/1, 0/1\n\
                   exif:gpslatituderef=S\n\
                   exif:gpslongitude=20/1, 0/1, 0/1\n\
                   exif:gpslongituderef=W\n";
        let exif = parse_exif(raw);
        assert_eq!(exif.latitude, Some(-10.5));
        assert_eq!(exif.longitude, Some(-20.0));

        let north_east = raw.replace("=S", "=N").replace("=W", "=E");
        let exif = parse_exif(&north_east);
        assert_eq!(exif.latitude, Some(10.5));
        assert_eq!(exif.longitude, Some(20.0));
    }

    #[test]
    fn test_gps_requires_all_four_attributes() {
        let raw = "exif:gpslatitude=10/1, 30/1, 0/1\n\
                   exif:gpslatituderef=N\n\
                   exif:gpslongitude=20/1, 0/1, 0/1\n\
                   exif:gpslongituderef=\n";
        let exif = parse_exif(raw);
        assert_eq!(exif.latitude, None);
        assert_eq!(exif.longitude, None);
    }

    #[test]
    fn test_altitude() {
        let above = parse_exif("exif:gpsaltitude=1234/10\nexif:gpsaltituderef=0\n");
        assert_eq!(above.altitude, Some(123.4));

        let below = parse_exif("exif:gpsaltitude=1234/10\nexif:gpsaltituderef=1\n");
        assert_eq!(below.altitude, Some(-123.4));

        let sea_level = parse_exif("exif:gpsaltitude=0/1\nexif:gpsaltituderef=0\n");
        assert_eq!(sea_level.altitude, Some(0.0));

        let no_ref = parse_exif("exif:gpsaltitude=1234/10\n");
        assert_eq!(no_ref.altitude, None);
    }

    #[test]
    fn test_hdr_heuristic() {
        let hdr = |make: &str, rendered: &str| {
            parse_exif(&format!("exif:make={make}\nexif:customrendered={rendered}\n")).hdr
        };
        assert_eq!(hdr("Apple", "3"), Some(true));
        assert_eq!(hdr("APPLE", "3"), Some(true));
        assert_eq!(hdr("Apple", "4"), Some(false));
        assert_eq!(hdr("Apple", "6"), None);
        assert_eq!(hdr("Canon", "3"), None);
        assert_eq!(hdr("Canon", "4"), None);
        assert_eq!(parse_exif("exif:customrendered=3\n").hdr, None);
    }

    #[test]
    fn test_resolution_needs_both_axes() {
        assert_eq!(parse_exif("xResolution=180\n").resolution, None);
        assert_eq!(parse_exif("yResolution=180\n").resolution, None);
        assert_eq!(
            parse_exif("xResolution=72.5\nyResolution=72.5\n")
                .resolution
                .as_deref(),
            Some("72.5x72.5")
        );
    }

    #[test]
    fn test_exif_resolution_wins_over_plain() {
        let raw = "exif:xresolution=300/1\nexif:yresolution=300/1\nxResolution=72\nyResolution=72\n";
        assert_eq!(parse_exif(raw).resolution.as_deref(), Some("300x300"));
    }

    #[test]
    fn test_repeated_tag_last_value_wins() {
        let exif = parse_exif("exif:model=First\nexif:model=Second\n");
        assert_eq!(exif.model.as_deref(), Some("Second"));
    }
}
