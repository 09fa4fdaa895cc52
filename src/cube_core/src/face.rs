use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

/// One side of the cube. The discriminant is the face's slot in the sticker
/// array: Up, Left, Front, Right, Back, Down.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    L,
    F,
    R,
    B,
    D,
}

/// The three rotational axes. Opposite faces share an axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    UD,
    LR,
    FB,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown face `{0}`, expected one of U, D, L, R, F, B")]
pub struct ParseFaceError(pub String);

impl Face {
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, L, F, R, B, D];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// Face order expected by the detection and solver endpoints.
    pub const URFDLB: [Self; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    pub fn slot(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::L => 'L',
            Face::F => 'F',
            Face::R => 'R',
            Face::B => 'B',
            Face::D => 'D',
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Face::U | Face::D => Axis::UD,
            Face::L | Face::R => Axis::LR,
            Face::F | Face::B => Axis::FB,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::L => Face::R,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::B => Face::F,
        }
    }

    /// The color of this face on a solved cube.
    pub fn home_color(self) -> Color {
        match self {
            Face::U => Color::White,
            Face::L => Color::Orange,
            Face::F => Color::Green,
            Face::R => Color::Red,
            Face::B => Color::Blue,
            Face::D => Color::Yellow,
        }
    }

    /// Human readable label, as used for face images.
    pub fn label(self) -> &'static str {
        match self {
            Face::U => "Up face",
            Face::L => "Left face",
            Face::F => "Front face",
            Face::R => "Right face",
            Face::B => "Back face",
            Face::D => "Down face",
        }
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = ParseFaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(Face::U),
            "L" => Ok(Face::L),
            "F" => Ok(Face::F),
            "R" => Ok(Face::R),
            "B" => Ok(Face::B),
            "D" => Ok(Face::D),
            _ => Err(ParseFaceError(s.to_owned())),
        }
    }
}
