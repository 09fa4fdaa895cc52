#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

pub mod budget;
pub mod color;
pub mod cube;
pub mod face;
pub mod moves;
pub mod notation;
pub mod rotation;
pub mod scramble;
pub mod state;

pub use budget::{ColorBudget, PaintError, Painted, Palette};
pub use color::Color;
pub use cube::Cube;
pub use face::{Axis, Face};
pub use moves::{Amount, Direction, Move, MoveSequence, ParseMoveError, Turn};
pub use notation::NotationError;
pub use rotation::{RotationEngine, StickerPermutation};
pub use scramble::{DEFAULT_SCRAMBLE_LENGTH, Scrambler};
pub use state::{CubeState, StickerCountError, Variant};
