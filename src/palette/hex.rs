use std::sync::OnceLock;

use regex::Regex;

use super::error::PaletteError;

/// `#RGB` / `#RRGGBB`, the leading `#` optional.
fn hex_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^#?([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$").ok())
        .as_ref()
}

pub fn is_valid_hex(text: &str) -> bool {
    hex_pattern().is_some_and(|re| re.is_match(text))
}

/// Validate user input and bring it to stored form: `#` followed by six hex
/// digits. Shorthand is expanded by doubling each digit. The case the user
/// typed is kept.
pub fn normalize(text: &str) -> Result<String, PaletteError> {
    if !is_valid_hex(text) {
        return Err(PaletteError::InvalidHexCode(text.to_string()));
    }
    let digits = text.trim_start_matches('#');
    let mut out = String::with_capacity(7);
    out.push('#');
    if digits.len() == 3 {
        for ch in digits.chars() {
            out.push(ch);
            out.push(ch);
        }
    } else {
        out.push_str(digits);
    }
    Ok(out)
}

/// Comparison key: `#` removed, upper-cased.
pub fn color_key(color: &str) -> String {
    color.replace('#', "").to_ascii_uppercase()
}

/// Loose equality used for duplicate detection.
pub fn same_color(a: &str, b: &str) -> bool {
    color_key(a) == color_key(b)
}

/// Exact equality tolerating only a leading `#` on one side. Used to find the
/// focused swatch again after a re-render.
pub fn same_swatch(a: &str, b: &str) -> bool {
    a == b || format!("#{}", a) == b || a == format!("#{}", b)
}

/// Parse a stored colour into RGB bytes. Stored entries can come from a
/// hand-edited URL, so anything that is not six hex digits yields `None`.
pub fn to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Form shown in the edit prompt: the stored value with a `#` added if missing.
pub fn display_form(color: &str) -> String {
    if color.starts_with('#') {
        color.to_string()
    } else {
        format!("#{}", color)
    }
}
