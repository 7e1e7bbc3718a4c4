use crate::parse_fn::number::leading_float;

/// Rounds half-up to three decimals, the precision rationals are reported with.
fn round_to_millis(value: f64) -> f64 {
    (1000.0 * value + 0.5).floor() / 1000.0
}

/// Parses an EXIF rational such as `129/18`, `1/60` or `5mm`.
///
/// Fractions are divided out and rounded to three decimals, plain numbers are
/// returned as-is. Values that do not produce a finite number give `None`.
pub fn rational(value: &str) -> Option<f64> {
    let value = value.replacen("mm", "", 1);
    let value = value.trim();

    let parsed = match value.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = leading_float(numerator)?;
            let denominator = leading_float(denominator)?;
            round_to_millis(numerator / denominator)
        }
        None => leading_float(value)?,
    };

    parsed.is_finite().then_some(parsed)
}

/// Parses a comma separated list of at least three rationals, as used for GPS
/// degrees/minutes/seconds. Components past the third are ignored.
pub fn rational_triplet(value: &str) -> Option<[f64; 3]> {
    let mut parts = value.split(',');
    let degrees = rational(parts.next()?)?;
    let minutes = rational(parts.next()?)?;
    let seconds = rational(parts.next()?)?;
    Some([degrees, minutes, seconds])
}
