use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::face::Face;

/// A sticker color. `Blank` is the unpainted sticker of a cleared cube and is
/// never part of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "whitesmoke")]
    White,
    #[serde(rename = "orange")]
    Orange,
    #[serde(rename = "green")]
    Green,
    #[serde(rename = "red")]
    Red,
    #[serde(rename = "blue")]
    Blue,
    #[serde(rename = "yellow")]
    Yellow,
    #[serde(rename = "grey")]
    Blank,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown color `{0}`, expected one of white, orange, green, red, blue, yellow")]
pub struct ParseColorError(pub String);

impl Color {
    /// The paintable colors in palette order.
    pub const PALETTE: [Color; 6] = {
        use Color::*;
        let v = [White, Orange, Green, Red, Blue, Yellow];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    /// Index into [`Color::PALETTE`], or `None` for `Blank`.
    pub fn palette_index(self) -> Option<usize> {
        match self {
            Color::Blank => None,
            color => Some(color as usize),
        }
    }

    /// The face this color belongs to on a solved cube.
    pub fn home_face(self) -> Option<Face> {
        match self {
            Color::White => Some(Face::U),
            Color::Orange => Some(Face::L),
            Color::Green => Some(Face::F),
            Color::Red => Some(Face::R),
            Color::Blue => Some(Face::B),
            Color::Yellow => Some(Face::D),
            Color::Blank => None,
        }
    }

    /// Face-notation letter used by the detection and solver endpoints.
    pub fn notation(self) -> Option<char> {
        self.home_face().map(Face::letter)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::White => "White",
            Color::Orange => "Orange",
            Color::Green => "Green",
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Blank => "Blank",
        };

        f.write_str(name)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "whitesmoke" | "w" => Ok(Color::White),
            "orange" | "o" => Ok(Color::Orange),
            "green" | "g" => Ok(Color::Green),
            "red" | "r" => Ok(Color::Red),
            "blue" | "b" => Ok(Color::Blue),
            "yellow" | "y" => Ok(Color::Yellow),
            "blank" | "grey" | "gray" => Ok(Color::Blank),
            _ => Err(ParseColorError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_round_trips_through_home_face() {
        for color in Color::PALETTE {
            let face = color.home_face().unwrap();
            assert_eq!(face.home_color(), color);
        }
        assert_eq!(Color::Blank.home_face(), None);
        assert_eq!(Color::Blank.palette_index(), None);
    }

    #[test]
    fn test_notation_letters() {
        let letters: String = Color::PALETTE
            .iter()
            .filter_map(|color| color.notation())
            .collect();
        assert_eq!(letters, "ULFRBD");
    }

    #[test]
    fn test_parse_accepts_wire_names() {
        assert_eq!("whitesmoke".parse::<Color>().unwrap(), Color::White);
        assert_eq!(" Yellow ".parse::<Color>().unwrap(), Color::Yellow);
        assert_eq!("grey".parse::<Color>().unwrap(), Color::Blank);
        assert!("purple".parse::<Color>().is_err());
    }
}
