//! The unfolded cube as text:
//!
//! ```text
//!       U
//!     L F R B
//!       D
//! ```

use cube_core::{Color, CubeState, Face};
use itertools::Itertools;
use owo_colors::{OwoColorize, Rgb};

fn letter(color: Color) -> char {
    match color {
        Color::White => 'W',
        Color::Orange => 'O',
        Color::Green => 'G',
        Color::Red => 'R',
        Color::Blue => 'B',
        Color::Yellow => 'Y',
        Color::Blank => '.',
    }
}

fn rgb(color: Color) -> Rgb {
    match color {
        Color::White => Rgb(245, 245, 245),
        Color::Orange => Rgb(255, 165, 0),
        Color::Green => Rgb(0, 128, 0),
        Color::Red => Rgb(255, 0, 0),
        Color::Blue => Rgb(0, 0, 255),
        Color::Yellow => Rgb(255, 255, 0),
        Color::Blank => Rgb(128, 128, 128),
    }
}

fn cell(color: Color, colored: bool) -> String {
    if colored {
        format!("{}", format!(" {} ", letter(color)).black().on_color(rgb(color)))
    } else {
        format!(" {} ", letter(color))
    }
}

fn face_row(state: &CubeState, face: Face, row: usize, colored: bool) -> String {
    let side = state.variant().side();
    state.face(face)[row * side..(row + 1) * side]
        .iter()
        .map(|&color| cell(color, colored))
        .collect()
}

/// Render the net, one line per sticker row. With `colored` each sticker
/// gets its color as an ANSI background.
pub fn render(state: &CubeState, colored: bool) -> String {
    let side = state.variant().side();
    let indent = "   ".repeat(side);
    let mut lines = vec![];

    for row in 0..side {
        lines.push(format!("{indent}{}", face_row(state, Face::U, row, colored)));
    }

    for row in 0..side {
        lines.push(
            [Face::L, Face::F, Face::R, Face::B]
                .into_iter()
                .map(|face| face_row(state, face, row, colored))
                .join(""),
        );
    }

    for row in 0..side {
        lines.push(format!("{indent}{}", face_row(state, Face::D, row, colored)));
    }

    lines.join("\n")
}
