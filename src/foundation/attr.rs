//! Declarative attribute parsing.
//!
//! Markup carries configuration as strings. Parsing follows the host's lenient integer and
//! float readers: leading whitespace is skipped, an optional sign and the longest numeric
//! prefix are read, and trailing garbage is ignored (`"250ms"` reads as `250`). Anything
//! without a numeric prefix falls back to the caller's default; no error is ever surfaced.

/// Lenient base-10 integer prefix parse. Saturates instead of overflowing.
pub fn parse_int(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim_start();
    let (negative, rest) = split_sign(s);
    let mut value: i64 = 0;
    let mut seen = false;
    for b in rest.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Lenient float prefix parse (`"0.5x"` -> `0.5`, `"-.25"` -> `-0.25`, `"1e2"` -> `100`).
pub fn parse_float(raw: Option<&str>) -> Option<f64> {
    let s = raw?.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if frac_end > frac_start || mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

/// Reveal delay in ms. Missing, malformed and negative values read as `0`.
pub fn delay_ms(raw: Option<&str>) -> u64 {
    parse_int(raw).map_or(0, |v| v.max(0) as u64)
}

/// Stagger interval in ms. Must be positive; anything else reads as `default_ms`.
pub fn stagger_interval_ms(raw: Option<&str>, default_ms: u64) -> u64 {
    match parse_int(raw) {
        Some(v) if v > 0 => v as u64,
        _ => default_ms,
    }
}

/// Parallax speed factor. Any finite non-zero value is kept, sign included.
pub fn parallax_speed(raw: Option<&str>, default_speed: f64) -> f64 {
    match parse_float(raw) {
        Some(v) if v != 0.0 => v,
        _ => default_speed,
    }
}

/// Autoplay interval in ms. `0` (or a negative value) disables autoplay; unparseable values
/// read as `default_ms`.
pub fn autoplay_interval_ms(raw: Option<&str>, default_ms: u64) -> u64 {
    parse_int(raw).map_or(default_ms, |v| v.max(0) as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/attr.rs"]
mod tests;
