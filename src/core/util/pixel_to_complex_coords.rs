use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;

/// Maps a pixel to its point on the complex plane.
///
/// `real = center.real + (x - width / 2) * scale` and
/// `imag = center.imag + (y - height / 2) * scale`, so image row 0 holds the
/// smallest imaginary part and the imaginary axis grows downwards.
///
/// The pixel must lie inside the viewport; this is only checked in debug builds.
#[inline]
#[must_use]
pub fn pixel_to_complex_coords(pixel: Point, viewport: &Viewport) -> Complex {
    debug_assert!(
        viewport.contains_pixel(pixel),
        "pixel ({}, {}) outside {}x{} viewport",
        pixel.x,
        pixel.y,
        viewport.width(),
        viewport.height()
    );

    let offset = viewport.pixel_offset(pixel);
    let center = viewport.center();

    Complex {
        real: center.real + offset.real * viewport.scale(),
        imag: center.imag + offset.imag * viewport.scale(),
    }
}
