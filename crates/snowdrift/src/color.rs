//! HSL to packed-RGBA conversion for particle coloring.

/// Converts an HSL color to a packed little-endian RGBA pixel:
/// `0xAABBGGRR` as a `u32`, bytes R,G,B,A in memory, the order a
/// canvas `ImageData` buffer expects.
///
/// `h`, `s` and `l` are in `[0, 1]`. Alpha is always opaque.
#[must_use]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> u32 {
    let (red, green, blue) = if s <= 0.0 {
        // Achromatic: all channels carry the lightness.
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    let red = (red * 255.0).round() as u32;
    let green = (green * 255.0).round() as u32;
    let blue = (blue * 255.0).round() as u32;

    red | (green << 8) | (blue << 16) | 0xFF00_0000
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
