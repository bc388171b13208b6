use std::error::Error;
use std::fmt;

use crate::core::data::point::Point;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelRectError {
    Empty { x0: u32, y0: u32, x1: u32, y1: u32 },
}

impl fmt::Display for PixelRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { x0, y0, x1, y1 } => {
                write!(
                    f,
                    "pixel rect must not be empty: x {}..{}, y {}..{}",
                    x0, x1, y0, y1
                )
            }
        }
    }
}

impl Error for PixelRectError {}

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PixelRect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelRect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Result<Self, PixelRectError> {
        if x1 <= x0 || y1 <= y0 {
            return Err(PixelRectError::Empty { x0, y0, x1, y1 });
        }

        Ok(Self { x0, y0, x1, y1 })
    }

    /// Rectangle covering a whole `width × height` image.
    pub fn full(width: u32, height: u32) -> Result<Self, PixelRectError> {
        Self::new(0, 0, width, height)
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point {
            x: self.x0,
            y: self.y0,
        }
    }

    #[must_use]
    pub fn x_range(&self) -> std::ops::Range<u32> {
        self.x0..self.x1
    }

    #[must_use]
    pub fn y_range(&self) -> std::ops::Range<u32> {
        self.y0..self.y1
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.x_range().contains(&point.x) && self.y_range().contains(&point.y)
    }

    #[must_use]
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}
