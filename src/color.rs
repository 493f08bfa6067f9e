use palette::{named, Srgb, WithAlpha};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Dashboard colours
// ---------------------------------------------------------------------------

/// Scatter marker fill.
pub const MARKER: Srgb<u8> = Srgb::new(0x63, 0x6e, 0xfa);

/// Fitted trend line.
pub const TRENDLINE: Srgb<u8> = named::RED;

/// Headings.
pub const HEADING: Srgb<u8> = named::DARKBLUE;

/// Axis lines and tick labels; gridlines use `GRID`.
pub const AXIS: Srgb<u8> = Srgb::new(0x44, 0x44, 0x44);
pub const GRID: Srgb<u8> = Srgb::new(0xe5, 0xec, 0xf6);

/// Error text in the chart region.
pub const ERROR: Srgb<u8> = named::FIREBRICK;

// ---------------------------------------------------------------------------
// CSS conversion
// ---------------------------------------------------------------------------

/// `#rrggbb` for use in SVG and style attributes.
pub fn hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// The same colour for drawing with plotters.
pub fn rgb(color: Srgb<u8>) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

/// `rgba(r, g, b, a)` with the alpha clamped to `0..=1`.
pub fn rgba(color: Srgb<u8>, alpha: f32) -> String {
    let c = color.with_alpha(alpha.clamp(0.0, 1.0));
    format!("rgba({}, {}, {}, {})", c.red, c.green, c.blue, c.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formats_named_colours() {
        assert_eq!(hex(TRENDLINE), "#ff0000");
        assert_eq!(hex(HEADING), "#00008b");
    }

    #[test]
    fn plotters_colour_keeps_channels() {
        assert_eq!(rgb(MARKER), RGBColor(0x63, 0x6e, 0xfa));
    }

    #[test]
    fn rgba_clamps_alpha() {
        assert_eq!(rgba(MARKER, 0.65), "rgba(99, 110, 250, 0.65)");
        assert_eq!(rgba(MARKER, 3.0), "rgba(99, 110, 250, 1)");
    }
}
