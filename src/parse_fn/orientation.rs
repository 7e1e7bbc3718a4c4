use crate::parse_fn::number::leading_int;

/// Orientation names as `identify` spells them, with the dash removed.
const ORIENTATIONS: [(&str, u8); 8] = [
    ("topleft", 1),
    ("topright", 2),
    ("bottomright", 3),
    ("bottomleft", 4),
    ("lefttop", 5),
    ("righttop", 6),
    ("rightbottom", 7),
    ("leftbottom", 8),
];

/// Maps an orientation value (`TopLeft`, `right-bottom`, `6`) to its EXIF code 1-8.
pub fn orientation(value: &str) -> Option<u8> {
    let normalized = value.to_lowercase().replacen('-', "", 1);
    if normalized.is_empty() || normalized == "undefined" {
        return None;
    }

    ORIENTATIONS
        .iter()
        .find(|(name, _)| *name == normalized)
        .map(|(_, code)| *code)
        .or_else(|| leading_int(&normalized).and_then(|code| u8::try_from(code).ok()))
        .filter(|code| (1..=8).contains(code))
}
