//! Color type and small pure color helpers.

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Parse an `RRGGBB` hex string, with or without a leading `#`.
///
/// Returns `None` for any other length or for non-hex digits.
pub fn rgb_from_hex(hex: &str) -> Option<Rgb> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgb { r, g, b })
}

/// Scale a color by a factor, truncating each channel downward.
///
/// Used for brightness application and for the breathing ramp. The factor
/// is expected in `[0.0, 1.0]`; the result is clamped to the byte range
/// either way.
pub fn scale(color: Rgb, factor: f32) -> Rgb {
    Rgb {
        r: scale_channel(color.r, factor),
        g: scale_channel(color.g, factor),
        b: scale_channel(color.b, factor),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale_channel(value: u8, factor: f32) -> u8 {
    libm::floorf(f32::from(value) * factor).clamp(0.0, 255.0) as u8
}
