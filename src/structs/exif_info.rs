use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized photographic metadata for one image.
///
/// Every field is independently optional: a tag that is missing from the
/// `identify` output, or that could not be parsed, leaves its field `None`.
/// Serializes with camelCase keys and omits absent fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExifInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// `"{x}x{y}"`, only when both axes are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// EXIF orientation code, 1-8.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<u8>,
    /// Digitized, original, file modify, file create: first one available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f_number: Option<f64>,
    /// Only derived for Apple devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hdr: Option<bool>,
    /// Signed decimal degrees, negative south of the equator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Signed decimal degrees, negative west of Greenwich.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Meters, negative below sea level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_serializes_camel_case_without_absent_fields() {
        let exif = ExifInfo {
            make: Some("Canon".to_string()),
            f_number: Some(2.0),
            date_time: Utc.with_ymd_and_hms(2006, 11, 12, 17, 8, 24).single(),
            ..Default::default()
        };

        let value = serde_json::to_value(&exif).unwrap();
        assert_eq!(
            value,
            json!({
                "make": "Canon",
                "fNumber": 2.0,
                "dateTime": "2006-11-12T17:08:24Z"
            })
        );

        let back: ExifInfo = serde_json::from_value(value).unwrap();
        assert_eq!(back, exif);
    }
}
