use crate::core::data::colour::Colour;

/// Deep blue rising to a pale white-blue band and falling back to black at
/// both ends of `t`.
#[must_use]
pub fn blue_white_gradient(t: f64) -> Colour {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;

    Colour {
        r: (9.0 * u * t * t * t * 255.0) as u8,
        g: (15.0 * u * u * t * t * 255.0) as u8,
        b: (8.5 * u * u * u * t * 255.0) as u8,
    }
}
