//! Immutable description of the visible part of the complex plane.
//!
//! Every navigation operation (pan, zoom, resize, ...) returns a new
//! [`Viewport`]; an existing value is never changed in place. Construction
//! validates the parameters, so everything downstream of a `Viewport` can
//! assume a positive finite scale and a non-empty image.

use std::error::Error;
use std::fmt;

use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
use crate::core::data::point::Point;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    InvalidScale { scale: f64 },
    NonFiniteCenter { center: Complex },
    ZeroSize { width: u32, height: u32 },
    ZeroMaxIterations,
    InvalidZoomFactor { factor: f64 },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScale { scale } => {
                write!(f, "viewport scale must be positive and finite: {}", scale)
            }
            Self::NonFiniteCenter { center } => {
                write!(
                    f,
                    "viewport center must be finite: ({}, {})",
                    center.real, center.imag
                )
            }
            Self::ZeroSize { width, height } => {
                write!(f, "viewport size must be positive: {}x{}", width, height)
            }
            Self::ZeroMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::InvalidZoomFactor { factor } => {
                write!(f, "zoom factor must be positive and finite: {}", factor)
            }
        }
    }
}

impl Error for ViewportError {}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    center: Complex,
    scale: f64,
    width: u32,
    height: u32,
    max_iterations: u32,
}

impl Viewport {
    pub fn new(
        center: Complex,
        scale: f64,
        width: u32,
        height: u32,
        max_iterations: u32,
    ) -> Result<Self, ViewportError> {
        if !(scale > 0.0) || !scale.is_finite() {
            return Err(ViewportError::InvalidScale { scale });
        }

        if !center.is_finite() {
            return Err(ViewportError::NonFiniteCenter { center });
        }

        if width == 0 || height == 0 {
            return Err(ViewportError::ZeroSize { width, height });
        }

        if max_iterations == 0 {
            return Err(ViewportError::ZeroMaxIterations);
        }

        Ok(Self {
            center,
            scale,
            width,
            height,
            max_iterations,
        })
    }

    /// Fits `region` horizontally into `width` pixels. The height follows the
    /// region's aspect ratio, truncated to whole pixels.
    pub fn from_region(
        region: ComplexRect,
        width: u32,
        max_iterations: u32,
    ) -> Result<Self, ViewportError> {
        if width == 0 {
            return Err(ViewportError::ZeroSize { width, height: 0 });
        }

        let scale = region.width() / f64::from(width);
        let height = (f64::from(width) * region.height() / region.width()) as u32;

        Self::new(region.center(), scale, width, height, max_iterations)
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    #[must_use]
    pub fn contains_pixel(&self, pixel: Point) -> bool {
        pixel.x < self.width && pixel.y < self.height
    }

    /// The plane region spanned by the image edges. Fails only when the
    /// extent is too small to be represented next to the center.
    pub fn region(&self) -> Result<ComplexRect, ComplexRectError> {
        let half_width = f64::from(self.width) / 2.0 * self.scale;
        let half_height = f64::from(self.height) / 2.0 * self.scale;

        ComplexRect::new(
            Complex::new(self.center.real - half_width, self.center.imag - half_height),
            Complex::new(self.center.real + half_width, self.center.imag + half_height),
        )
    }

    pub fn with_center(&self, center: Complex) -> Result<Self, ViewportError> {
        Self::new(
            center,
            self.scale,
            self.width,
            self.height,
            self.max_iterations,
        )
    }

    /// Moves the view by a distance in plane units.
    pub fn translate(&self, delta: Complex) -> Result<Self, ViewportError> {
        self.with_center(self.center + delta)
    }

    /// Moves the view by a distance in pixels, as produced by a drag gesture.
    pub fn pan(&self, dx: f64, dy: f64) -> Result<Self, ViewportError> {
        self.translate(Complex::new(dx * self.scale, dy * self.scale))
    }

    /// Zooms around the center. `factor > 1` zooms in, `factor < 1` zooms out.
    pub fn zoom(&self, factor: f64) -> Result<Self, ViewportError> {
        if !(factor > 0.0) || !factor.is_finite() {
            return Err(ViewportError::InvalidZoomFactor { factor });
        }

        Self::new(
            self.center,
            self.scale / factor,
            self.width,
            self.height,
            self.max_iterations,
        )
    }

    /// Zooms while keeping the plane point under `pixel` fixed on screen.
    pub fn zoom_at(&self, pixel: Point, factor: f64) -> Result<Self, ViewportError> {
        let zoomed = self.zoom(factor)?;
        let anchor = self.pixel_offset(pixel);

        zoomed.with_center(Complex::new(
            self.center.real + anchor.real * (self.scale - zoomed.scale),
            self.center.imag + anchor.imag * (self.scale - zoomed.scale),
        ))
    }

    /// Same center and scale on a differently sized image.
    pub fn resize(&self, width: u32, height: u32) -> Result<Self, ViewportError> {
        Self::new(self.center, self.scale, width, height, self.max_iterations)
    }

    pub fn with_max_iterations(&self, max_iterations: u32) -> Result<Self, ViewportError> {
        Self::new(
            self.center,
            self.scale,
            self.width,
            self.height,
            max_iterations,
        )
    }

    /// Pixel position relative to the image center, in pixels.
    #[must_use]
    pub(crate) fn pixel_offset(&self, pixel: Point) -> Complex {
        Complex::new(
            f64::from(pixel.x) - f64::from(self.width) / 2.0,
            f64::from(pixel.y) - f64::from(self.height) / 2.0,
        )
    }
}
