/// `1234567` → `"1,234,567"`.
pub fn format_with_commas(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round half away from zero to `decimals` places.
pub fn round_to(n: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (n * factor).round() / factor
}

/// Uniform integer in `min..=max`. Arguments in the wrong order are swapped.
pub fn random_between(rng: &mut fastrand::Rng, min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rng.i64(lo..=hi)
}

/// Clamp without panicking.
///
/// Unlike [`f64::clamp`], an inverted range yields `max` and a NaN input
/// yields `min`, so the result is always a finite bound or `num` itself.
pub fn clamp(num: f64, min: f64, max: f64) -> f64 {
    num.max(min).min(max)
}

/// Linear interpolation; `factor` is not clamped.
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}
