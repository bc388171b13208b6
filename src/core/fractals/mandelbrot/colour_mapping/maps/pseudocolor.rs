use crate::core::data::colour::Colour;

/// Hue cycle driven by `sqrt(t)`, starting and ending at cyan, at full
/// saturation and brightness.
#[must_use]
pub fn pseudocolor(t: f64) -> Colour {
    hsb_to_colour(t.clamp(0.0, 1.0).sqrt() + 0.5, 1.0, 1.0)
}

/// HSB to RGB with the hue taken modulo 1. Channels round to nearest.
#[must_use]
pub fn hsb_to_colour(hue: f64, saturation: f64, brightness: f64) -> Colour {
    let channel = |v: f64| (v * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let v = channel(brightness);
        return Colour { r: v, g: v, b: v };
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u8 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    Colour {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}
