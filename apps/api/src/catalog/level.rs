/// Parses a level-metric cell ("IPE") into a numeric rank.
///
/// - `"3"` → `Some(3.0)`
/// - `"3-5"` → `Some(4.0)` (mean of the range bounds)
/// - `"abc"`, `""`, `"NaN"` → `None` (unknown level, job is never eligible)
///
/// Range bounds must be whole numbers written as plain digits. Other range parts
/// (decimals, text) are ignored, so `"3.5-4.5"` is unknown and `"3-x"` is 3.
pub fn parse_level_metric(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.contains('-') {
        let bounds: Vec<f64> = raw
            .split('-')
            .map(str::trim)
            .filter(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
            .filter_map(|part| part.parse::<f64>().ok())
            .collect();
        if bounds.is_empty() {
            return None;
        }
        return Some(bounds.iter().sum::<f64>() / bounds.len() as f64);
    }

    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
