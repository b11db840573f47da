//! Color helpers shared by the generators.

/// Linear RGB triple.
pub type Rgb = [f32; 3];

/// Plain white.
pub const WHITE: Rgb = [1.0, 1.0, 1.0];

/// Convert one sRGB-encoded channel to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

/// Decode a `0xRRGGBB` literal, treating it as sRGB, into linear RGB.
pub fn hex_to_linear(hex: u32) -> Rgb {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

/// CSS-style HSL to (sRGB) RGB. `hue` in degrees, `saturation` and
/// `lightness` in [0, 1].
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    let h = hue.rem_euclid(360.0);
    let a = saturation * lightness.min(1.0 - lightness);
    let f = |n: f32| {
        let k = (n + h / 30.0) % 12.0;
        lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    [f(0.0), f(8.0), f(4.0)]
}

/// Component-wise linear interpolation.
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Multiply every channel by `k`.
pub fn scale_rgb(c: Rgb, k: f32) -> Rgb {
    [c[0] * k, c[1] * k, c[2] * k]
}
