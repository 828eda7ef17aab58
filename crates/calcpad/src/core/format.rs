//! Number formatting for the calculator display
//!
//! Three renderings are in play:
//!
//! - [`number_to_string`]: shortest round-trip decimal form, used for chained
//!   results, sign toggling and percent.
//! - [`format_result`]: the policy applied to the result of `=`.
//! - [`render_display`]: how the display string is drawn on screen.

/// Magnitude at which results switch to exponential notation
pub const EXPONENTIAL_THRESHOLD: f64 = 1e12;

/// Smallest non-zero magnitude shown in positional notation
pub const SMALL_THRESHOLD: f64 = 1e-6;

/// Significant digits kept by [`format_result`]
pub const RESULT_PRECISION: usize = 12;

/// Magnitude at which the shortest form itself switches to exponential
const SHORTEST_EXPONENTIAL_THRESHOLD: f64 = 1e21;

/// Parses an operand from display text.
///
/// Accepts a trailing decimal point (`"12."`). Returns `None` for anything
/// that is not a number, including error tokens and NaN.
#[must_use]
pub fn parse_operand(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let body = trimmed.strip_suffix('.').unwrap_or(trimmed);
    body.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Shortest decimal form that round-trips to the same `f64`.
///
/// Negative zero renders as `"0"`. Magnitudes of 1e21 and above, and
/// non-zero magnitudes below 1e-6, use exponential notation with an
/// explicitly signed exponent (`"1e+21"`, `"1.5e-7"`).
#[must_use]
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= SHORTEST_EXPONENTIAL_THRESHOLD || magnitude < SMALL_THRESHOLD {
        sign_exponent(&format!("{value:e}"))
    } else {
        format!("{value}")
    }
}

/// Exponential notation with a fixed number of fractional digits
#[must_use]
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }
    sign_exponent(&format!("{value:.fraction_digits$e}"))
}

/// Formats the result of `=` for the display.
///
/// Integers under 1e12 in magnitude render without a decimal point.
/// Magnitudes of 1e12 and above, and non-zero magnitudes under 1e-6,
/// render in exponential notation with six fractional digits. Everything
/// else is rounded to twelve significant digits with trailing zeros trimmed.
#[must_use]
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }

    let magnitude = value.abs();
    if value.fract() == 0.0 && magnitude < EXPONENTIAL_THRESHOLD {
        return number_to_string(value);
    }
    if magnitude >= EXPONENTIAL_THRESHOLD || (magnitude < SMALL_THRESHOLD && value != 0.0) {
        return to_exponential(value, 6);
    }

    let rounded = format!("{value:.prec$e}", prec = RESULT_PRECISION - 1)
        .parse::<f64>()
        .unwrap_or(value);
    number_to_string(rounded)
}

/// Renders the display string for the screen.
///
/// Numbers too large or too small for the display are drawn with four
/// exponential digits; everything else, error tokens included, is drawn as
/// typed.
#[must_use]
pub fn render_display(text: &str) -> String {
    let Some(value) = parse_operand(text) else {
        return text.to_string();
    };

    let magnitude = value.abs();
    if magnitude >= EXPONENTIAL_THRESHOLD || (magnitude < SMALL_THRESHOLD && value != 0.0) {
        to_exponential(value, 4)
    } else {
        text.to_string()
    }
}

/// Font size bucket for the main display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySize {
    /// Up to 6 characters
    ExtraLarge,
    /// Up to 9 characters
    Large,
    /// Up to 12 characters
    Medium,
    /// Anything longer
    Small,
}

impl DisplaySize {
    /// Every size, largest first
    pub const ALL: [Self; 4] = [Self::ExtraLarge, Self::Large, Self::Medium, Self::Small];

    /// Picks the size bucket for a display string
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        match text.chars().count() {
            0..=6 => Self::ExtraLarge,
            7..=9 => Self::Large,
            10..=12 => Self::Medium,
            _ => Self::Small,
        }
    }

    /// CSS class applied to the display element
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::ExtraLarge => "text-5xl",
            Self::Large => "text-4xl",
            Self::Medium => "text-3xl",
            Self::Small => "text-2xl",
        }
    }
}

/// Rewrites `1e21` as `1e+21`; negative exponents are left alone.
fn sign_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted.to_string(),
    }
}
