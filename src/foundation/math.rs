/// Wrap a possibly out-of-range index into `[0, len)`.
///
/// `-1` maps to `len - 1` and `len` maps to `0`; further steps wrap the same way.
/// `len` must be non-zero.
pub(crate) fn wrap_index(index: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    let len = len as i64;
    index.rem_euclid(len) as usize
}

/// Render an integer with `,` thousands separators (`-1234567` -> `-1,234,567`).
pub(crate) fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
