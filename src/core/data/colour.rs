#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    #[must_use]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_default() {
        assert_eq!(Colour::default(), Colour::BLACK);
    }

    #[test]
    fn test_to_bytes_is_rgb_order() {
        let colour = Colour { r: 1, g: 2, b: 3 };

        assert_eq!(colour.to_bytes(), [1, 2, 3]);
    }
}
