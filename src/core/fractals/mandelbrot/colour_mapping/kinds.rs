use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::maps::{
    blue_white_gradient::blue_white_gradient, fire_gradient::fire_gradient,
    grayscale::grayscale, pseudocolor::pseudocolor,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteKindError {
    Unknown { name: String },
}

impl fmt::Display for PaletteKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown { name } => {
                let known: Vec<&str> = PaletteKind::ALL.iter().map(|k| k.config_name()).collect();
                write!(
                    f,
                    "unknown palette '{}', expected one of: {}",
                    name,
                    known.join(", ")
                )
            }
        }
    }
}

impl Error for PaletteKindError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteKind {
    #[default]
    Fire,
    BlueWhite,
    Pseudocolor,
    Grayscale,
}

impl PaletteKind {
    pub const ALL: &'static [Self] = &[
        Self::Fire,
        Self::BlueWhite,
        Self::Pseudocolor,
        Self::Grayscale,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Fire => "Fire gradient",
            Self::BlueWhite => "Blue-white gradient",
            Self::Pseudocolor => "Pseudocolor",
            Self::Grayscale => "Grayscale",
        }
    }

    /// Name used in configuration files.
    #[must_use]
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::BlueWhite => "blue-white",
            Self::Pseudocolor => "pseudocolor",
            Self::Grayscale => "grayscale",
        }
    }

    /// Colour at position `t ∈ [0, 1]` along the palette.
    #[must_use]
    pub fn colour_at(self, t: f64) -> Colour {
        match self {
            Self::Fire => fire_gradient(t),
            Self::BlueWhite => blue_white_gradient(t),
            Self::Pseudocolor => pseudocolor(t),
            Self::Grayscale => grayscale(t),
        }
    }
}

impl FromStr for PaletteKind {
    type Err = PaletteKindError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let wanted = name.trim();

        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.config_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PaletteKindError::Unknown {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}
