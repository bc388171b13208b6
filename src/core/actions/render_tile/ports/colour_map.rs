use crate::core::data::colour::Colour;
use crate::core::data::escape_result::EscapeResult;

pub trait ColourMap {
    /// Must be a pure function of its arguments.
    fn colour_for(&self, result: &EscapeResult, max_iterations: u32) -> Colour;

    fn display_name(&self) -> &str;
}
