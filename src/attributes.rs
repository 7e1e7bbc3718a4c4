use crate::parse_fn::{datetime, number, orientation, rational, string};
use chrono::{DateTime, Utc};
use log::trace;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Lower-cased tag names as they appear in `identify` output.
pub mod tags {
    pub const MAKE: &str = "exif:make";
    pub const MODEL: &str = "exif:model";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const EXIF_X_RESOLUTION: &str = "exif:xresolution";
    pub const EXIF_Y_RESOLUTION: &str = "exif:yresolution";
    pub const X_RESOLUTION: &str = "xresolution";
    pub const Y_RESOLUTION: &str = "yresolution";
    pub const ORIENTATION: &str = "exif:orientation";
    pub const DATE_TIME_ORIGINAL: &str = "exif:datetimeoriginal";
    pub const DATE_TIME_DIGITIZED: &str = "exif:datetimedigitized";
    pub const DATE_MODIFY: &str = "date:modify";
    pub const DATE_CREATE: &str = "date:create";
    pub const FOCAL_LENGTH: &str = "exif:focallength";
    pub const EXPOSURE_TIME: &str = "exif:exposuretime";
    pub const F_NUMBER: &str = "exif:fnumber";
    pub const CUSTOM_RENDERED: &str = "exif:customrendered";
    pub const GPS_ALTITUDE: &str = "exif:gpsaltitude";
    pub const GPS_ALTITUDE_REF: &str = "exif:gpsaltituderef";
    pub const GPS_LATITUDE: &str = "exif:gpslatitude";
    pub const GPS_LATITUDE_REF: &str = "exif:gpslatituderef";
    pub const GPS_LONGITUDE: &str = "exif:gpslongitude";
    pub const GPS_LONGITUDE_REF: &str = "exif:gpslongituderef";
}

/// A tag value after its typed parser ran.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Triplet([f64; 3]),
    Char(char),
    DateTime(DateTime<Utc>),
}

pub type TagParser = fn(&str) -> Option<AttributeValue>;

static TAG_PARSERS: LazyLock<HashMap<&'static str, TagParser>> = LazyLock::new(|| {
    let as_text: TagParser = |v| Some(AttributeValue::Text(string::string(v)));
    let as_integer: TagParser = |v| number::leading_int(v).map(AttributeValue::Integer);
    let as_rational: TagParser = |v| rational::rational(v).map(AttributeValue::Float);
    let as_triplet: TagParser = |v| rational::rational_triplet(v).map(AttributeValue::Triplet);
    let as_char: TagParser = |v| string::first_char(v).map(AttributeValue::Char);
    let as_orientation: TagParser =
        |v| orientation::orientation(v).map(|code| AttributeValue::Integer(code.into()));
    let as_exif_date: TagParser = |v| datetime::exif_datetime(v).map(AttributeValue::DateTime);
    let as_iso_date: TagParser = |v| datetime::iso_datetime(v).map(AttributeValue::DateTime);

    HashMap::from([
        (tags::MAKE, as_text),
        (tags::MODEL, as_text),
        (tags::WIDTH, as_integer),
        (tags::HEIGHT, as_integer),
        (tags::EXIF_X_RESOLUTION, as_rational),
        (tags::EXIF_Y_RESOLUTION, as_rational),
        (tags::X_RESOLUTION, as_rational),
        (tags::Y_RESOLUTION, as_rational),
        (tags::ORIENTATION, as_orientation),
        (tags::DATE_TIME_ORIGINAL, as_exif_date),
        (tags::DATE_TIME_DIGITIZED, as_exif_date),
        (tags::DATE_MODIFY, as_iso_date),
        (tags::DATE_CREATE, as_iso_date),
        (tags::FOCAL_LENGTH, as_rational),
        (tags::EXPOSURE_TIME, as_rational),
        (tags::F_NUMBER, as_rational),
        (tags::CUSTOM_RENDERED, as_integer),
        (tags::GPS_ALTITUDE, as_rational),
        (tags::GPS_ALTITUDE_REF, as_integer),
        (tags::GPS_LATITUDE, as_triplet),
        (tags::GPS_LATITUDE_REF, as_char),
        (tags::GPS_LONGITUDE, as_triplet),
        (tags::GPS_LONGITUDE_REF, as_char),
    ])
});

/// Parsed attributes of one `identify` run, keyed by lower-cased tag name.
///
/// A tag that appears more than once keeps its last value. If that last value
/// does not parse, the tag is absent.
#[derive(Debug, Clone, Default)]
pub struct RawAttributes {
    values: HashMap<&'static str, AttributeValue>,
}

impl RawAttributes {
    pub fn from_text(raw: &str) -> Self {
        let mut attributes = Self::default();
        for line in raw.lines() {
            attributes.insert_line(line);
        }
        attributes
    }

    /// Parses one `name=value` line. Lines without `=` and unknown tags are ignored.
    pub fn insert_line(&mut self, line: &str) {
        let Some((name, value)) = line.trim().split_once('=') else {
            return;
        };
        let name = name.trim().to_lowercase();
        let value = value.trim();

        let Some((&tag, &parser)) = TAG_PARSERS.get_key_value(name.as_str()) else {
            return;
        };
        trace!("Parsing attribute {}={}", tag, value);

        match parser(value) {
            Some(parsed) => {
                self.values.insert(tag, parsed);
            }
            None => {
                self.values.remove(tag);
            }
        }
    }

    pub fn get(&self, tag: &str) -> Option<&AttributeValue> {
        self.values.get(tag)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn text(&self, tag: &str) -> Option<&str> {
        match self.get(tag)? {
            AttributeValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, tag: &str) -> Option<i64> {
        match self.get(tag)? {
            AttributeValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn float(&self, tag: &str) -> Option<f64> {
        match self.get(tag)? {
            AttributeValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn triplet(&self, tag: &str) -> Option<[f64; 3]> {
        match self.get(tag)? {
            AttributeValue::Triplet(values) => Some(*values),
            _ => None,
        }
    }

    pub fn char(&self, tag: &str) -> Option<char> {
        match self.get(tag)? {
            AttributeValue::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn datetime(&self, tag: &str) -> Option<DateTime<Utc>> {
        match self.get(tag)? {
            AttributeValue::DateTime(datetime) => Some(*datetime),
            _ => None,
        }
    }
}
