//! Degrees/minutes/seconds text to signed decimal degrees.
//!
//! Accepted form: `<N|S|E|W><deg>°<min>'<sec>"`, direction case-insensitive,
//! whitespace tolerated around the whole string and between the direction and the
//! numbers. The seconds part (and its closing quote) may be omitted.
use crate::error::{Error, Result};

/// Parses a DMS coordinate such as `N 1°16'12"` or `E103°52'00"` into decimal degrees.
///
/// Southern and western directions produce negative values.
pub fn parse_dms(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let Some(direction) = trimmed.chars().next() else {
        return Err(Error::dms(text, "input is empty"));
    };

    let negate = match direction.to_ascii_uppercase() {
        'N' | 'E' => false,
        'S' | 'W' => true,
        _ => return Err(Error::dms(text, "must start with N, S, E or W")),
    };

    let numeric = trimmed[direction.len_utf8()..].trim();
    let (deg_text, rest) = numeric
        .split_once('°')
        .ok_or_else(|| Error::dms(text, "missing degree separator '°'"))?;
    let (min_text, sec_text) = rest
        .split_once('\'')
        .ok_or_else(|| Error::dms(text, "missing minute separator '''"))?;

    let degrees = parse_component(text, deg_text, "degrees")?;
    let minutes = parse_component(text, min_text, "minutes")?;
    let sec_text = sec_text.trim().trim_end_matches('"').trim();
    let seconds = if sec_text.is_empty() {
        0.0
    } else {
        parse_component(text, sec_text, "seconds")?
    };

    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    Ok(if negate { -value } else { value })
}

fn parse_component(input: &str, part: &str, what: &str) -> Result<f64> {
    part.trim()
        .parse::<f64>()
        .map_err(|_| Error::dms(input, format!("{what} '{}' is not a number", part.trim())))
}
