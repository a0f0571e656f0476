use core::fmt;
use serde::{Deserialize, Serialize};

/// An RGB color, compared by exact channel values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A slot in the cell grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Colored(Color),
}

impl Cell {
    pub const fn color(self) -> Option<Color> {
        match self {
            Self::Empty => None,
            Self::Colored(color) => Some(color),
        }
    }

    pub const fn is_clickable(self) -> bool {
        matches!(self, Self::Colored(_))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        Self::Colored(color)
    }
}
