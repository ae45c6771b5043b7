/// True iff every value is finite (no NaN, no infinity).
pub fn are_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// True iff every value is strictly greater than zero.
pub fn are_all_positive(values: &[f64]) -> bool {
    values.iter().all(|&v| v > 0.0)
}

/// A value as it arrives from a form field: already numeric, or text that
/// still needs coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    /// Coerce to `f64` the way a form's unary plus does.
    ///
    /// Blank text is `0`, unparseable text is `NaN`. Unsigned `0x`/`0o`/`0b`
    /// literals are read in their radix. Only the spelled-out `Infinity` is
    /// accepted as an infinity; `inf`/`nan` spellings are `NaN`.
    pub fn coerce(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => coerce_text(s),
        }
    }
}

fn coerce_text(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = radix_literal(t) {
        return n;
    }
    // Rust's float parser also takes "inf"/"nan" words; those are not numbers here.
    if !t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_literal(t: &str) -> Option<f64> {
    let radix = match t.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &t[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

impl From<f64> for RawNumber {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for RawNumber {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
